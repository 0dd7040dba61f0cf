//! Implementation of checkers rules: board representation, pieces and the
//! search for capture and move candidates.

pub mod board;
pub mod core;
pub mod piece;
