//! Domain layer: commands, report extraction and listing policy.

pub mod commands;
pub mod limit;
pub mod report;
