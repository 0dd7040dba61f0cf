//! Rules engine for two-player checkers (draughts): board state, legal captures
//! and moves, the forced-capture rule, multi-jump chains and the turn
//! alternation state machine.
//!
//! The engine is purely reactive. A presentation layer (or the text protocol
//! driver shipped in the binary) sends user intents to
//! [`game::session::GameSession`] and drains the
//! [`game::notification::Notification`]s it produces in response.

// Rustdoc lints.
#![warn(
    rustdoc::private_doc_tests,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]

pub mod error;
pub mod game;
pub mod rules;

mod engine;
pub use engine::Engine;
pub use error::{Error, Result};
use shadow_rs::shadow;

shadow!(build);

/// Returns the full engine version that can be used to identify how it was
/// built in the first place.
fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints information about the engine version on startup.
pub fn print_engine_info() {
    println!("Checkers engine {}", engine_version());
}

/// Prints the build type and whether the build is clean on engine startup.
pub fn print_binary_info() {
    println!("Release build: {}", !shadow_rs::is_debug());
    if !shadow_rs::git_clean() {
        println!("Warning: built with uncommitted changes");
    }
    println!();
}
