//! Path selection over the full candidate lattice.
//!
//! The lexicon's full mode lists every dictionary word found in the text.
//! Those candidates form a lattice over byte positions; a [`PathSelection`]
//! picks one path through it.

use std::sync::Arc;

use jieba_rs::Jieba;

use super::{Segment, SegmentOptions, Segmenter, tag_segments};
use crate::error::Result;

/// How a path through the candidate lattice is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathSelection {
    /// The path with the fewest words (unit-weight shortest path). Ties prefer
    /// the path with fewer single-character words.
    FewestWords,
    /// Greedy forward maximum matching: always take the longest word starting
    /// at the current position.
    MaximumMatch,
}

/// Candidate words keyed by start offset.
struct Lattice {
    /// `edges[start]` holds the end offsets of the candidates starting at `start`.
    edges: Vec<Vec<usize>>,
    len: usize,
}

impl Lattice {
    fn build(lexicon: &Jieba, text: &str) -> Self {
        let len = text.len();
        let mut edges = vec![Vec::new(); len + 1];
        let base = text.as_ptr() as usize;

        for word in lexicon.cut_all(text) {
            if word.is_empty() {
                continue;
            }
            // Candidates borrow from `text`; recover their spans.
            let start = (word.as_ptr() as usize).wrapping_sub(base);
            let end = start.wrapping_add(word.len());
            if end <= len && text.get(start..end) == Some(word) {
                edges[start].push(end);
            }
        }

        // Every char boundary must be able to advance. Uncovered Latin runs
        // advance as one word.
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        for (i, &(start, c)) in chars.iter().enumerate() {
            if !edges[start].is_empty() {
                continue;
            }
            let mut end = start + c.len_utf8();
            if is_latin_word_char(c) {
                for &(next, nc) in &chars[i + 1..] {
                    if !is_latin_word_char(nc) || !edges[next].is_empty() {
                        break;
                    }
                    end = next + nc.len_utf8();
                }
            }
            edges[start].push(end);
        }

        for ends in edges.iter_mut() {
            ends.sort_unstable();
            ends.dedup();
        }

        Lattice { edges, len }
    }

    fn longest_from(&self, start: usize) -> Option<usize> {
        self.edges[start].last().copied()
    }

    fn maximum_match(&self) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut cursor = 0;
        while cursor < self.len {
            let Some(end) = self.longest_from(cursor) else {
                break;
            };
            segments.push(Segment::new(cursor, end));
            cursor = end;
        }
        segments
    }

    fn fewest_words(&self, text: &str) -> Vec<Segment> {
        // Cost is (words, single-char words). Edges only point forward, so
        // relaxing positions right to left is enough for the shortest path.
        let mut cost: Vec<Option<(usize, usize)>> = vec![None; self.len + 1];
        let mut next = vec![self.len; self.len + 1];
        cost[self.len] = Some((0, 0));

        for start in (0..self.len).rev() {
            for &end in self.edges[start].iter().rev() {
                let Some((words, singles)) = cost[end] else {
                    continue;
                };
                let single = usize::from(text[start..end].chars().nth(1).is_none());
                let candidate = (words + 1, singles + single);
                if cost[start].is_none_or(|current| candidate < current) {
                    cost[start] = Some(candidate);
                    next[start] = end;
                }
            }
        }

        let mut segments = Vec::new();
        let mut cursor = 0;
        while cursor < self.len && cost[cursor].is_some() {
            segments.push(Segment::new(cursor, next[cursor]));
            cursor = next[cursor];
        }
        segments
    }

    /// Candidates of at least two chars strictly inside `outer`.
    fn nested_in(&self, text: &str, outer: &Segment) -> Vec<Segment> {
        let mut nested = Vec::new();
        for start in outer.start..outer.end {
            for &end in &self.edges[start] {
                if end > outer.end || (start == outer.start && end == outer.end) {
                    continue;
                }
                if text[start..end].chars().count() >= 2 {
                    nested.push(Segment::new(start, end));
                }
            }
        }
        nested
    }
}

fn is_latin_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Segments by selecting a path through the candidate lattice.
pub struct LatticeSegmenter {
    lexicon: Arc<Jieba>,
    selection: PathSelection,
    options: SegmentOptions,
}

impl LatticeSegmenter {
    pub fn new(lexicon: Arc<Jieba>, selection: PathSelection, options: SegmentOptions) -> Self {
        LatticeSegmenter {
            lexicon,
            selection,
            options,
        }
    }
}

impl Segmenter for LatticeSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<Segment>> {
        let lattice = Lattice::build(&self.lexicon, text);
        let path = match self.selection {
            PathSelection::FewestWords => lattice.fewest_words(text),
            PathSelection::MaximumMatch => lattice.maximum_match(),
        };

        let mut segments = if self.options.index_mode {
            let mut expanded = Vec::with_capacity(path.len());
            for segment in path {
                if segment.text(text).chars().count() > 2 {
                    let nested = lattice.nested_in(text, &segment);
                    expanded.push(segment);
                    expanded.extend(nested);
                } else {
                    expanded.push(segment);
                }
            }
            expanded
        } else {
            path
        };

        if self.options.tagging {
            tag_segments(&self.lexicon, text, self.options.hmm, &mut segments);
        }

        Ok(segments)
    }

    fn name(&self) -> &'static str {
        match self.selection {
            PathSelection::FewestWords => "dijkstra",
            PathSelection::MaximumMatch => "speed",
        }
    }
}

impl std::fmt::Debug for LatticeSegmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatticeSegmenter")
            .field("selection", &self.selection)
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Dictionaries;

    fn lexicon_with(words: &[&str]) -> Arc<Jieba> {
        let mut lexicon = Jieba::empty();
        for word in words {
            lexicon.add_word(word, Some(100), None);
        }
        Arc::new(lexicon)
    }

    fn words<'a>(text: &'a str, segments: &[Segment]) -> Vec<&'a str> {
        segments.iter().map(|s| s.text(text)).collect()
    }

    #[test]
    fn test_maximum_match_is_greedy() {
        // Greedy matching takes 研究生 and strands 命 and 起源.
        let lexicon = lexicon_with(&["研究", "研究生", "生命", "起源"]);
        let segmenter =
            LatticeSegmenter::new(lexicon, PathSelection::MaximumMatch, SegmentOptions::default());
        let text = "研究生命起源";

        let segments = segmenter.segment(text).unwrap();
        assert_eq!(words(text, &segments), vec!["研究生", "命", "起源"]);
    }

    #[test]
    fn test_fewest_words_avoids_greedy_trap() {
        let lexicon = lexicon_with(&["研究", "研究生", "生命", "起源"]);
        let segmenter =
            LatticeSegmenter::new(lexicon, PathSelection::FewestWords, SegmentOptions::default());
        let text = "研究生命起源";

        let segments = segmenter.segment(text).unwrap();
        assert_eq!(words(text, &segments), vec!["研究", "生命", "起源"]);
        assert_eq!(segmenter.name(), "dijkstra");
    }

    #[test]
    fn test_latin_words_stay_whole() {
        let lexicon = lexicon_with(&["搜索"]);
        let segmenter =
            LatticeSegmenter::new(lexicon, PathSelection::MaximumMatch, SegmentOptions::default());
        let text = "Rust搜索";

        let segments = segmenter.segment(text).unwrap();
        assert_eq!(words(text, &segments), vec!["Rust", "搜索"]);
    }

    #[test]
    fn test_index_mode_adds_nested_words() {
        let lexicon = Dictionaries::builtin().lexicon(None, false).unwrap();
        let segmenter = LatticeSegmenter::new(
            lexicon,
            PathSelection::MaximumMatch,
            SegmentOptions {
                index_mode: true,
                ..Default::default()
            },
        );
        let text = "中华人民共和国";

        let segments = segmenter.segment(text).unwrap();
        let found = words(text, &segments);
        assert_eq!(found[0], "中华人民共和国");
        assert!(found.contains(&"人民"));
        assert!(found.contains(&"共和国"));
    }
}
