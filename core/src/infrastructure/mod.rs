pub mod llm;
pub mod product;
