//! Text analysis: tokens, tokenizers, token filters and analyzers.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
