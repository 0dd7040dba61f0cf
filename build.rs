//! Retrieves information about the version of the engine from Git and the build
//! environment. The engine prints it on startup so that a running binary can be
//! traced back to the exact sources it was built from.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
