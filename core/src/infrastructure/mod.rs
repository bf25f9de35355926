pub mod cache;
pub mod llm;
