// Resume tailoring: job analysis, resume parsing, keyword selection, LLM rewrite.
// All LLM calls go through llm_client; no direct Anthropic calls here.

pub mod generator;
pub mod handlers;
pub mod jd_parser;
pub mod keyword_selector;
pub mod prompts;
pub mod resume_parser;
