//! Token filters applied after segmentation.
//!
//! The tokenizer assembles a chain of filters from its configuration:
//!
//! - [`normalize::NormalizeFilter`] - NFKC folding and lowercasing (`enable_normalization`)
//! - [`stop::StopFilter`] - Removes stop words (`enable_stop_dictionary`)
//! - [`length::LengthFilter`] - Drops over-long tokens (`max_token_length`)
//! - [`stem::StemFilter`] - English stemming of Latin words (`enable_porter_stemming`)
//!
//! Filters that remove tokens keep the token graph intact: the removed
//! token's position increment is added to the next token that survives.
//!
//! # Examples
//!
//! ```
//! use analysis_hanlp::analysis::token::Token;
//! use analysis_hanlp::analysis::token_filter::Filter;
//! use analysis_hanlp::analysis::token_filter::stop::StopFilter;
//!
//! let filter = StopFilter::from_words(vec!["的"]);
//! let tokens = vec![Token::new("我", 0), Token::new("的", 1), Token::new("书", 2)];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[1].text, "书");
//! assert_eq!(result[1].position_increment, 2);
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` so a tokenizer holding a filter chain can
/// be used from any analysis thread.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod length;
pub mod normalize;
pub mod stem;
pub mod stop;

pub use length::LengthFilter;
pub use normalize::NormalizeFilter;
pub use stem::StemFilter;
pub use stop::StopFilter;

/// Drop the tokens matching `remove`, carrying their position increments over
/// to the next kept token.
pub(crate) fn remove_preserving_positions<F>(tokens: TokenStream, mut remove: F) -> Vec<Token>
where
    F: FnMut(&Token) -> bool,
{
    let mut kept = Vec::new();
    let mut carried = 0;
    for token in tokens {
        if remove(&token) {
            carried += token.position_increment;
            continue;
        }
        let increment = token.position_increment + carried;
        carried = 0;
        kept.push(token.with_position_increment(increment));
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removal_carries_increments() {
        let tokens = vec![
            Token::new("a", 0),
            Token::new("b", 1),
            Token::new("c", 2),
            Token::new("cc", 2).with_position_increment(0),
            Token::new("d", 3),
        ];

        let kept = remove_preserving_positions(Box::new(tokens.into_iter()), |t| {
            t.text == "b" || t.text == "c"
        });

        let increments: Vec<_> = kept
            .iter()
            .map(|t| (t.text.as_str(), t.position_increment))
            .collect();
        assert_eq!(increments, vec![("a", 1), ("cc", 2), ("d", 1)]);
    }
}
