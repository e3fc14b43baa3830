//! Normalization filter implementation.
//!
//! Folds full-width forms and compatibility characters with NFKC, then
//! lowercases. Offsets keep pointing at the original text.
//!
//! # Examples
//!
//! ```
//! use analysis_hanlp::analysis::token::Token;
//! use analysis_hanlp::analysis::token_filter::Filter;
//! use analysis_hanlp::analysis::token_filter::normalize::NormalizeFilter;
//!
//! let filter = NormalizeFilter::new();
//! let tokens = vec![Token::new("ＨａｎＬＰ", 0)];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//!
//! assert_eq!(result[0].text, "hanlp");
//! ```

use unicode_normalization::UnicodeNormalization;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that applies NFKC normalization and lowercasing.
#[derive(Clone, Debug, Default)]
pub struct NormalizeFilter;

impl NormalizeFilter {
    /// Create a new normalization filter.
    pub fn new() -> Self {
        NormalizeFilter
    }
}

/// NFKC-fold and lowercase a word.
pub fn normalize(word: &str) -> String {
    let folded: String = word.nfkc().collect();
    folded.to_lowercase()
}

impl Filter for NormalizeFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|token| {
            let normalized = normalize(&token.text);
            if normalized == token.text {
                token
            } else {
                token.with_text(normalized)
            }
        })))
    }

    fn name(&self) -> &'static str {
        "normalize"
    }
}
