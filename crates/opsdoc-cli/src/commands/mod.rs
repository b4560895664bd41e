//! Command handlers. Each translates parsed arguments into core calls and
//! prints the outcome; no business logic lives here.

pub mod generate;
pub mod stats;
