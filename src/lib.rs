pub mod classify;
pub mod cli;
pub mod comment;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod rules;
pub mod sink;
pub mod sources;

#[cfg(test)]
pub mod test_helpers;
