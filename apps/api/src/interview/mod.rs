pub mod difficulty;
pub mod evaluation;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod questions;
pub mod report;
