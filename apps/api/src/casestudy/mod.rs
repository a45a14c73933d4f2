//! Case-study form, prompt assembly, and pipeline orchestration.

pub mod assembler;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
