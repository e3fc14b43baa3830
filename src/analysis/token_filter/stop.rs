//! Stop filter implementation.
//!
//! Removes words listed in the stop word dictionary. The dictionary itself is
//! owned by [`Dictionaries`](crate::segment::Dictionaries) and shared between
//! all tokenizers of a plugin.

use std::sync::Arc;

use ahash::AHashSet;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::normalize::normalize;
use crate::analysis::token_filter::{Filter, remove_preserving_positions};
use crate::error::Result;

/// A filter that removes stop words from the token stream.
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: Arc<AHashSet<String>>,
}

impl StopFilter {
    /// Create a stop filter over a shared stop word set.
    pub fn with_stop_words(stop_words: Arc<AHashSet<String>>) -> Self {
        StopFilter { stop_words }
    }

    /// Create a stop filter from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_stop_words(Arc::new(words.into_iter().map(Into::into).collect()))
    }

    /// The same filter with every stop word folded by [`normalize`], for
    /// chains that normalize tokens before stopping them.
    pub fn normalized(self) -> Self {
        let folded = self.stop_words.iter().map(|w| normalize(w)).collect();
        Self::with_stop_words(Arc::new(folded))
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let kept = remove_preserving_positions(tokens, |token| self.is_stop_word(&token.text));
        Ok(Box::new(kept.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
