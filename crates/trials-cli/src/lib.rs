//! Library components of the trial index builder CLI.

pub mod logging;
pub mod pipeline;
pub mod types;
