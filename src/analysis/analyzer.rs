//! Analyzers produce the token stream pipeline for a field.
//!
//! ```text
//! Field text → Analyzer::create_components(field)
//!                 ↓
//!             Segmenter (fresh per call)
//!                 ↓
//!             HanLpTokenizer → filters → TokenStream
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

pub mod hanlp;

pub use hanlp::HanLpAnalyzer;

/// Trait for analyzers that build per-field token stream pipelines.
///
/// `create_components` may be called concurrently and repeatedly; every call
/// returns components that share no mutable state with any other call.
pub trait Analyzer: Send + Sync {
    /// Build the token stream components for one field analysis.
    fn create_components(&self, field_name: &str) -> Result<TokenStreamComponents>;

    /// Analyze `text` as the value of `field_name`.
    fn analyze(&self, field_name: &str, text: &str) -> Result<TokenStream> {
        self.create_components(field_name)?.token_stream(text)
    }

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &str;
}

/// The pipeline built for one field analysis.
pub struct TokenStreamComponents {
    field_name: String,
    tokenizer: Box<dyn Tokenizer>,
}

impl TokenStreamComponents {
    pub fn new<S: Into<String>>(field_name: S, tokenizer: Box<dyn Tokenizer>) -> Self {
        TokenStreamComponents {
            field_name: field_name.into(),
            tokenizer,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }

    /// Run the pipeline over `text`.
    pub fn token_stream(&self, text: &str) -> Result<TokenStream> {
        self.tokenizer.tokenize(text)
    }
}

impl std::fmt::Debug for TokenStreamComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStreamComponents")
            .field("field_name", &self.field_name)
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}
