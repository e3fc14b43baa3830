//! The tokenizer behind every registered variant.
//!
//! It runs a segmentation engine and reshapes its spans into tokens. The
//! engine's decisions are never changed; the tokenizer only orders spans,
//! assigns positions and applies the configured filters.

use std::path::PathBuf;
use std::sync::Arc;

use crate::analysis::token::{POS_ATTRIBUTE, Token, TokenStream, TokenType};
use crate::analysis::token_filter::{
    Filter, LengthFilter, NormalizeFilter, StemFilter, StopFilter,
};
use crate::analysis::tokenizer::{Tokenizer, TokenizerFactory};
use crate::config::Configuration;
use crate::error::Result;
use crate::segment::{Dictionaries, Segment, SegmentAlgorithm, Segmenter};

/// Emits a segmentation engine's output as tokens.
///
/// The configuration is read once, when the tokenizer is built.
pub struct HanLpTokenizer {
    segmenter: Box<dyn Segmenter>,
    enable_offset: bool,
    tagging: bool,
    filters: Vec<Box<dyn Filter>>,
}

impl HanLpTokenizer {
    /// Build a tokenizer around `segmenter`.
    ///
    /// Fails only when the stop word dictionary is enabled and cannot be read.
    pub fn new(
        segmenter: Box<dyn Segmenter>,
        configuration: &Configuration,
        dictionaries: &Dictionaries,
    ) -> Result<Self> {
        let mut filters: Vec<Box<dyn Filter>> = Vec::new();
        if configuration.enable_normalization {
            filters.push(Box::new(NormalizeFilter::new()));
        }
        if configuration.enable_stop_dictionary {
            let stop = StopFilter::with_stop_words(dictionaries.stop_words()?);
            // Tokens are already folded, so the stop words must be too.
            let stop = if configuration.enable_normalization {
                stop.normalized()
            } else {
                stop
            };
            filters.push(Box::new(stop));
        }
        filters.push(Box::new(LengthFilter::new(configuration.max_token_length)));
        if configuration.enable_porter_stemming {
            filters.push(Box::new(StemFilter::new()));
        }

        Ok(HanLpTokenizer {
            segmenter,
            enable_offset: configuration.enable_offset,
            tagging: configuration.enable_part_of_speech_tagging,
            filters,
        })
    }

    /// Name of the underlying segmentation engine.
    pub fn segmenter_name(&self) -> &'static str {
        self.segmenter.name()
    }

    /// Names of the filters in application order.
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    fn emit(&self, text: &str, mut segments: Vec<Segment>) -> Vec<Token> {
        segments.retain(|s| text.get(s.start..s.end).is_some_and(|w| !w.trim().is_empty()));
        segments.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
        segments.dedup_by(|next, kept| next.start == kept.start && next.end == kept.end);

        let mut tokens = Vec::with_capacity(segments.len());
        let mut position = 0;
        let mut covering_end = None;

        for segment in segments {
            // A span inside the covering word is one of its sub-words.
            let increment = match covering_end {
                Some(end) if segment.start < end => {
                    covering_end = Some(end.max(segment.end));
                    0
                }
                Some(_) => {
                    position += 1;
                    covering_end = Some(segment.end);
                    1
                }
                None => {
                    covering_end = Some(segment.end);
                    1
                }
            };

            let word = &text[segment.start..segment.end];
            let (start_offset, end_offset) = if self.enable_offset {
                (segment.start, segment.end)
            } else {
                (0, 0)
            };

            let mut token = Token::with_offsets(word, position, start_offset, end_offset)
                .with_token_type(TokenType::detect(word))
                .with_position_increment(increment);
            if let Some(pos) = segment.pos.filter(|_| self.tagging) {
                token = token.with_attribute(POS_ATTRIBUTE, pos);
            }
            tokens.push(token);
        }

        tokens
    }
}

impl Tokenizer for HanLpTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let segments = self.segmenter.segment(text)?;
        let mut tokens: TokenStream = Box::new(self.emit(text, segments).into_iter());

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "hanlp"
    }
}

impl std::fmt::Debug for HanLpTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HanLpTokenizer")
            .field("segmenter", &self.segmenter.name())
            .field("enable_offset", &self.enable_offset)
            .field("tagging", &self.tagging)
            .field("filters", &self.filter_names())
            .finish()
    }
}

/// Creates [`HanLpTokenizer`]s for one registered variant.
#[derive(Clone)]
pub struct HanLpTokenizerFactory {
    name: String,
    algorithm: SegmentAlgorithm,
    model: Option<PathBuf>,
    configuration: Configuration,
    dictionaries: Arc<Dictionaries>,
}

impl HanLpTokenizerFactory {
    pub fn new<S: Into<String>>(
        name: S,
        algorithm: SegmentAlgorithm,
        model: Option<PathBuf>,
        configuration: Configuration,
        dictionaries: Arc<Dictionaries>,
    ) -> Self {
        HanLpTokenizerFactory {
            name: name.into(),
            algorithm,
            model,
            configuration,
            dictionaries,
        }
    }

    /// The same factory with a different configuration snapshot.
    pub fn with_configuration(&self, configuration: Configuration) -> Self {
        HanLpTokenizerFactory {
            configuration,
            ..self.clone()
        }
    }

    pub fn algorithm(&self) -> SegmentAlgorithm {
        self.algorithm
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Build a tokenizer with a fresh segmentation engine.
    pub fn build(&self) -> Result<HanLpTokenizer> {
        let segmenter = self.algorithm.new_segmenter(
            &self.dictionaries,
            self.model.as_deref(),
            &self.configuration,
        )?;
        HanLpTokenizer::new(segmenter, &self.configuration, &self.dictionaries)
    }
}

impl TokenizerFactory for HanLpTokenizerFactory {
    fn create(&self) -> Result<Box<dyn Tokenizer>> {
        Ok(Box::new(self.build()?))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for HanLpTokenizerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HanLpTokenizerFactory")
            .field("name", &self.name)
            .field("algorithm", &self.algorithm)
            .field("model", &self.model)
            .field("configuration", &self.configuration)
            .finish()
    }
}
