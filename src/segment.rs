//! Segmentation engines.
//!
//! The closed set of algorithms a variant can select is [`SegmentAlgorithm`].
//! Each algorithm builds a fresh [`Segmenter`] per analysis from the shared,
//! lazily loaded lexicons in [`Dictionaries`]:
//!
//! | Algorithm    | Lexicon          | Path selection                          |
//! |--------------|------------------|-----------------------------------------|
//! | `Viterbi`    | core             | max-probability DAG path, HMM optional  |
//! | `Perceptron` | perceptron model | max-probability DAG path, HMM optional  |
//! | `Crf`        | CRF model        | max-probability DAG path, HMM optional  |
//! | `NShortest`  | core             | max-probability DAG path, no HMM        |
//! | `Dijkstra`   | core             | fewest-words path over all candidates   |
//! | `Speed`      | core             | forward maximum matching                |
//!
//! Engines only report byte spans; turning them into tokens is the
//! tokenizer's job.

use std::path::Path;

use ahash::AHashMap;
use jieba_rs::Jieba;
use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::error::{HanLpError, Result};

pub mod dag;
pub mod dictionary;
pub mod lattice;

pub use dag::DagSegmenter;
pub use dictionary::Dictionaries;
pub use lattice::{LatticeSegmenter, PathSelection};

/// A word found by a segmenter, as a byte span of the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    /// Part-of-speech tag, when tagging was requested and the tagger agreed on the span.
    pub pos: Option<String>,
}

impl Segment {
    pub fn new(start: usize, end: usize) -> Self {
        Segment {
            start,
            end,
            pos: None,
        }
    }

    /// The segment's text within `text`.
    pub fn text<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Options fixed when a segmenter is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SegmentOptions {
    /// Also report the sub-words of long words.
    pub index_mode: bool,
    /// Use the HMM to recognize out-of-vocabulary words.
    pub hmm: bool,
    /// Attach part-of-speech tags.
    pub tagging: bool,
}

/// A segmentation engine.
///
/// Instances are created per analysis and never shared between concurrent
/// analyses, but the lexicons they reference are.
pub trait Segmenter: Send + Sync {
    /// Split `text` into words. Spans are byte offsets on char boundaries.
    fn segment(&self, text: &str) -> Result<Vec<Segment>>;

    /// Get the name of this segmenter (for debugging and logging).
    fn name(&self) -> &'static str;
}

/// The closed set of segmentation strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentAlgorithm {
    Viterbi,
    Perceptron,
    Crf,
    NShortest,
    Dijkstra,
    Speed,
}

impl SegmentAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            SegmentAlgorithm::Viterbi => "viterbi",
            SegmentAlgorithm::Perceptron => "perceptron",
            SegmentAlgorithm::Crf => "crf",
            SegmentAlgorithm::NShortest => "n_shortest",
            SegmentAlgorithm::Dijkstra => "dijkstra",
            SegmentAlgorithm::Speed => "speed",
        }
    }

    /// Whether this algorithm segments with a model lexicon instead of the core one.
    pub fn requires_model(&self) -> bool {
        matches!(self, SegmentAlgorithm::Perceptron | SegmentAlgorithm::Crf)
    }

    /// Build a fresh segmenter configured by `configuration`.
    ///
    /// `model` is the variant's model resource; it is required for the model
    /// based algorithms and ignored otherwise. Loading failures surface here,
    /// per call, rather than at registration.
    pub fn new_segmenter(
        self,
        dictionaries: &Dictionaries,
        model: Option<&Path>,
        configuration: &Configuration,
    ) -> Result<Box<dyn Segmenter>> {
        let with_custom = configuration.enable_custom_dictionary;
        let options = SegmentOptions {
            index_mode: configuration.enable_index_mode,
            hmm: configuration.enable_new_word_recognize,
            tagging: configuration.enable_part_of_speech_tagging,
        };

        let segmenter: Box<dyn Segmenter> = match self {
            SegmentAlgorithm::Viterbi => Box::new(DagSegmenter::new(
                dictionaries.lexicon(None, with_custom)?,
                options,
                self.name(),
            )),
            SegmentAlgorithm::Perceptron | SegmentAlgorithm::Crf => {
                let model = model.ok_or_else(|| {
                    HanLpError::analysis(format!("{} segmenter requires a model", self.name()))
                })?;
                Box::new(DagSegmenter::new(
                    dictionaries.lexicon(Some(model), with_custom)?,
                    options,
                    self.name(),
                ))
            }
            SegmentAlgorithm::NShortest => Box::new(DagSegmenter::new(
                dictionaries.lexicon(None, with_custom)?,
                SegmentOptions {
                    hmm: false,
                    ..options
                },
                self.name(),
            )),
            SegmentAlgorithm::Dijkstra => Box::new(LatticeSegmenter::new(
                dictionaries.lexicon(None, with_custom)?,
                PathSelection::FewestWords,
                options,
            )),
            SegmentAlgorithm::Speed => Box::new(LatticeSegmenter::new(
                dictionaries.lexicon(None, with_custom)?,
                PathSelection::MaximumMatch,
                options,
            )),
        };

        Ok(segmenter)
    }
}

/// Attach part-of-speech tags to the segments whose spans match the tagger's words.
pub(crate) fn tag_segments(lexicon: &Jieba, text: &str, hmm: bool, segments: &mut [Segment]) {
    let mut tags = AHashMap::new();
    let mut cursor = 0;
    for tag in lexicon.tag(text, hmm) {
        let Some(found) = text[cursor..].find(tag.word) else {
            continue;
        };
        let start = cursor + found;
        let end = start + tag.word.len();
        tags.insert((start, end), tag.tag.to_string());
        cursor = end;
    }

    for segment in segments.iter_mut() {
        if let Some(pos) = tags.get(&(segment.start, segment.end)) {
            segment.pos = Some(pos.clone());
        }
    }
}

/// Maps char indices to byte offsets.
pub(crate) struct CharOffsets {
    offsets: Vec<usize>,
}

impl CharOffsets {
    pub(crate) fn new(text: &str) -> Self {
        let mut offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        offsets.push(text.len());
        CharOffsets { offsets }
    }

    /// Byte offset of the char at `index`; past the end maps to the text length.
    pub(crate) fn byte(&self, index: usize) -> usize {
        let last = self.offsets.len() - 1;
        self.offsets[index.min(last)]
    }
}
