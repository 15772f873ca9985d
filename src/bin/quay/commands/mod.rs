//! Command implementations

pub mod candidates;
pub mod check;
pub mod completions;
pub mod locations;
pub mod resolve;
