//! Stemming filter implementation.
//!
//! Only Latin words are stemmed; Chinese words have no inflection and pass
//! through unchanged.

use rust_stemmers::{Algorithm, Stemmer};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Filter that reduces English words to their stems.
pub struct StemFilter {
    stemmer: Stemmer,
}

impl std::fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StemFilter")
            .field("algorithm", &"english")
            .finish()
    }
}

impl StemFilter {
    /// Create a new stem filter with the English (Porter2) stemmer.
    pub fn new() -> Self {
        StemFilter {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Stem a single word. Words with non-ASCII letters are returned as is.
    pub fn stem(&self, word: &str) -> String {
        if is_latin_word(word) {
            self.stemmer.stem(word).into_owned()
        } else {
            word.to_string()
        }
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_latin_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}

impl Filter for StemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stemmed: Vec<_> = tokens
            .map(|token| {
                if !is_latin_word(&token.text) {
                    return token;
                }
                let stem = self.stemmer.stem(&token.text).into_owned();
                if stem == token.text {
                    token
                } else {
                    token.with_text(stem)
                }
            })
            .collect();
        Ok(Box::new(stemmed.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}
