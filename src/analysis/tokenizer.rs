//! Tokenizers turn field text into tokens.
//!
//! A [`Tokenizer`] is built for one analysis and owns its segmentation
//! engine. A [`TokenizerFactory`] is what the host keeps: it knows which
//! strategy and configuration to use and creates a fresh tokenizer on every
//! call.
//!
//! # Examples
//!
//! ```
//! use analysis_hanlp::analysis::token::{Token, TokenStream};
//! use analysis_hanlp::analysis::tokenizer::Tokenizer;
//! use analysis_hanlp::error::Result;
//!
//! struct CommaTokenizer;
//!
//! impl Tokenizer for CommaTokenizer {
//!     fn tokenize(&self, text: &str) -> Result<TokenStream> {
//!         let tokens: Vec<Token> = text
//!             .split('，')
//!             .enumerate()
//!             .map(|(i, s)| Token::new(s, i))
//!             .collect();
//!         Ok(Box::new(tokens.into_iter()))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "comma"
//!     }
//! }
//!
//! let tokens: Vec<_> = CommaTokenizer.tokenize("北京，上海").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod hanlp;

pub use hanlp::{HanLpTokenizer, HanLpTokenizerFactory};

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` to allow use in concurrent contexts.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Creates tokenizers on demand.
///
/// Every call to [`create`](TokenizerFactory::create) returns an independent
/// tokenizer with its own engine.
pub trait TokenizerFactory: Send + Sync {
    /// Create a new tokenizer.
    fn create(&self) -> Result<Box<dyn Tokenizer>>;

    /// The registered name this factory was created for.
    fn name(&self) -> &str;
}
