pub mod analysis;
pub mod handlers;
pub mod intel;
pub mod matching;
pub mod prompts;
