//! Token types produced by the analysis pipeline.
//!
//! A [`Token`] carries the term text, its byte offsets in the field value and
//! its place in the token graph. Index-mode segmentation emits sub-words that
//! overlap the word they were split from; those share the word's position:
//!
//! ```text
//! Input: "中华人民共和国"
//!
//!   Position 0: "中华人民共和国" (pos_inc=1)
//!   Position 0: "中华"           (pos_inc=0)
//!   Position 0: "人民"           (pos_inc=0)
//!   Position 0: "共和国"         (pos_inc=0)
//! ```
//!
//! # Examples
//!
//! ```
//! use analysis_hanlp::analysis::token::{Token, TokenType};
//!
//! let token = Token::with_offsets("北京", 0, 0, 6).with_token_type(TokenType::Cjk);
//! assert_eq!(token.text, "北京");
//! assert_eq!(token.end_offset, 6);
//! assert_eq!(token.token_type(), Some(TokenType::Cjk));
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Metadata attribute holding the part-of-speech tag.
pub const POS_ATTRIBUTE: &str = "pos";

/// A single unit of analyzed text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// Additional metadata attached to the token
    pub metadata: Option<TokenMetadata>,

    /// Position increment from the previous token (default: 1).
    ///
    /// - 1: next position
    /// - 0: same position as the previous token (index-mode sub-words)
    /// - >1: positions were skipped (removed stop words)
    pub position_increment: usize,
}

/// Classification of token content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// Latin-script letters and digits
    Alphanum,
    /// Digits only
    Num,
    /// Chinese characters
    Cjk,
    /// Punctuation marks, ASCII or full-width
    Punctuation,
    /// Anything else
    Other,
}

impl TokenType {
    /// Classify a word by its characters.
    pub fn detect(word: &str) -> TokenType {
        if word.is_empty() {
            return TokenType::Other;
        }

        if word.chars().all(|c| c.is_ascii_digit() || is_fullwidth_digit(c)) {
            return TokenType::Num;
        }

        if word.chars().any(is_cjk) {
            return TokenType::Cjk;
        }

        if word
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return TokenType::Alphanum;
        }

        if word
            .chars()
            .all(|c| c.is_ascii_punctuation() || is_cjk_punctuation(c))
        {
            return TokenType::Punctuation;
        }

        TokenType::Other
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}' |   // CJK Unified Ideographs
        '\u{3400}'..='\u{4DBF}' |   // Extension A
        '\u{F900}'..='\u{FAFF}' |   // Compatibility Ideographs
        '\u{20000}'..='\u{2A6DF}' | // Extension B
        '\u{2A700}'..='\u{2CEAF}'   // Extensions C-E
    )
}

fn is_fullwidth_digit(c: char) -> bool {
    matches!(c, '\u{FF10}'..='\u{FF19}')
}

fn is_cjk_punctuation(c: char) -> bool {
    matches!(c,
        '\u{3000}'..='\u{303F}' | // CJK Symbols and Punctuation
        '\u{FF01}'..='\u{FF0F}' |
        '\u{FF1A}'..='\u{FF20}' |
        '\u{FF3B}'..='\u{FF40}' |
        '\u{FF5B}'..='\u{FF65}' |
        '\u{2014}' | '\u{2026}' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}'
    )
}

/// Additional metadata that can be attached to tokens
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Token type classification
    pub token_type: Option<TokenType>,

    /// Additional attributes, e.g. the part-of-speech tag
    pub attributes: HashMap<String, String>,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Self::with_offsets(text, position, 0, 0)
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            metadata: None,
            position_increment: 1,
        }
    }

    /// Length of the token text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the token text, keeping everything else.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }

    /// Set the token type in metadata.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        let metadata = self.metadata.get_or_insert_with(TokenMetadata::default);
        metadata.token_type = Some(token_type);
        self
    }

    /// Set a metadata attribute.
    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        let metadata = self.metadata.get_or_insert_with(TokenMetadata::default);
        metadata.attributes.insert(key.into(), value.into());
        self
    }

    /// Set the position increment.
    pub fn with_position_increment(mut self, increment: usize) -> Self {
        self.position_increment = increment;
        self
    }

    pub fn token_type(&self) -> Option<TokenType> {
        self.metadata.as_ref().and_then(|m| m.token_type)
    }

    /// Get a metadata attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.attributes.get(key))
            .map(|s| s.as_str())
    }

    /// The part-of-speech tag, when tagging was enabled.
    pub fn part_of_speech(&self) -> Option<&str> {
        self.attribute(POS_ATTRIBUTE)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("你好", 0);
        assert_eq!(token.text, "你好");
        assert_eq!(token.position, 0);
        assert_eq!(token.position_increment, 1);
        assert_eq!(token.char_len(), 2);
        assert!(token.metadata.is_none());
    }

    #[test]
    fn test_token_attributes() {
        let token = Token::with_offsets("北京", 0, 0, 6)
            .with_token_type(TokenType::Cjk)
            .with_attribute(POS_ATTRIBUTE, "ns");

        assert_eq!(token.token_type(), Some(TokenType::Cjk));
        assert_eq!(token.part_of_speech(), Some("ns"));
        assert_eq!(token.attribute("missing"), None);
    }

    #[test]
    fn test_detect_token_type() {
        assert_eq!(TokenType::detect("中文"), TokenType::Cjk);
        assert_eq!(TokenType::detect("2024"), TokenType::Num);
        assert_eq!(TokenType::detect("Rust"), TokenType::Alphanum);
        assert_eq!(TokenType::detect("。"), TokenType::Punctuation);
        assert_eq!(TokenType::detect("，"), TokenType::Punctuation);
        assert_eq!(TokenType::detect("!?"), TokenType::Punctuation);
        assert_eq!(TokenType::detect(""), TokenType::Other);
    }
}
