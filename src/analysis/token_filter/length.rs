//! Length filter implementation.

use super::{Filter, remove_preserving_positions};

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// A filter that drops tokens longer than a maximum number of characters.
#[derive(Clone, Debug)]
pub struct LengthFilter {
    max_chars: usize,
}

impl LengthFilter {
    /// Create a new length filter. Tokens with more than `max_chars`
    /// characters are removed.
    pub fn new(max_chars: usize) -> Self {
        LengthFilter { max_chars }
    }

    /// Get the maximum token length in characters.
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }
}

impl Filter for LengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let max_chars = self.max_chars;
        let kept = remove_preserving_positions(tokens, |token| token.char_len() > max_chars);
        Ok(Box::new(kept.into_iter()))
    }

    fn name(&self) -> &'static str {
        "length"
    }
}
