// ATS Analysis: prompt building, resilient generation, tolerant reply parsing.
// All generation calls go through llm_client. No direct HTTP calls here.

pub mod analyzer;
pub mod handlers;
pub mod history;
pub mod models;
pub mod parser;
pub mod prompts;
