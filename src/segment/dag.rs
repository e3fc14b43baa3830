//! Max-probability path segmentation over the lexicon's word DAG.

use std::sync::Arc;

use jieba_rs::{Jieba, TokenizeMode};

use super::{CharOffsets, Segment, SegmentOptions, Segmenter, tag_segments};
use crate::error::Result;

/// Segments along the most probable path of the word DAG, optionally
/// recognizing unknown words with the HMM. In index mode the library's search
/// mode also reports the 2- and 3-character words inside longer ones.
pub struct DagSegmenter {
    lexicon: Arc<Jieba>,
    options: SegmentOptions,
    name: &'static str,
}

impl DagSegmenter {
    pub fn new(lexicon: Arc<Jieba>, options: SegmentOptions, name: &'static str) -> Self {
        DagSegmenter {
            lexicon,
            options,
            name,
        }
    }

    pub fn options(&self) -> SegmentOptions {
        self.options
    }
}

impl Segmenter for DagSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<Segment>> {
        let mode = if self.options.index_mode {
            TokenizeMode::Search
        } else {
            TokenizeMode::Default
        };

        // The library reports char offsets.
        let offsets = CharOffsets::new(text);
        let mut segments: Vec<Segment> = self
            .lexicon
            .tokenize(text, mode, self.options.hmm)
            .into_iter()
            .map(|token| Segment::new(offsets.byte(token.start), offsets.byte(token.end)))
            .collect();

        if self.options.tagging {
            tag_segments(&self.lexicon, text, self.options.hmm, &mut segments);
        }

        Ok(segments)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Debug for DagSegmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DagSegmenter")
            .field("name", &self.name)
            .field("options", &self.options)
            .finish()
    }
}
