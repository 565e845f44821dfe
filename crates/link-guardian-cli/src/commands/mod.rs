//! CLI commands

pub mod banner;
pub mod interactive;
pub mod scan;
pub mod sources;
pub mod verdicts;
pub mod version;
