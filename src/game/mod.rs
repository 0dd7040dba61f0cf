//! Game flow on top of [`crate::rules`]: configuration, the turn state machine
//! and the session that alternates turns between the two colors.

pub mod config;
pub mod notification;
pub mod session;
pub mod turn;
