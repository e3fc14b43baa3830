//! The fixed set of registrable variants.
//!
//! | Name             | Algorithm    | Required resource        | Index mode |
//! |------------------|--------------|--------------------------|------------|
//! | `hanlp`          | `Viterbi`    |                          | configured |
//! | `hanlp_standard` | `Viterbi`    |                          | configured |
//! | `hanlp_index`    | `Viterbi`    |                          | forced     |
//! | `hanlp_nlp`      | `Perceptron` | [`PERCEPTRON_CWS_MODEL`] | configured |
//! | `hanlp_crf`      | `Crf`        | [`CRF_CWS_MODEL`]        | configured |
//! | `hanlp_n_short`  | `NShortest`  |                          | configured |
//! | `hanlp_dijkstra` | `Dijkstra`   |                          | configured |
//! | `hanlp_speed`    | `Speed`      |                          | configured |
//!
//! These names are what index settings refer to; renaming one breaks them.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::segment::SegmentAlgorithm;

pub const HANLP: &str = "hanlp";
pub const HANLP_STANDARD: &str = "hanlp_standard";
pub const HANLP_INDEX: &str = "hanlp_index";
pub const HANLP_NLP: &str = "hanlp_nlp";
pub const HANLP_CRF: &str = "hanlp_crf";
pub const HANLP_N_SHORT: &str = "hanlp_n_short";
pub const HANLP_DIJKSTRA: &str = "hanlp_dijkstra";
pub const HANLP_SPEED: &str = "hanlp_speed";

/// Perceptron segmentation model, relative to the home directory.
pub const PERCEPTRON_CWS_MODEL: &str = "plugins/analysis-hanlp/data/model/perceptron/large/cws.bin";

/// CRF segmentation model, relative to the home directory.
pub const CRF_CWS_MODEL: &str = "plugins/analysis-hanlp/data/model/crf/pku199801/cws.txt.bin";

static DEFAULT_CATALOG: LazyLock<Vec<StrategyDescriptor>> = LazyLock::new(|| {
    vec![
        StrategyDescriptor::new(HANLP, SegmentAlgorithm::Viterbi),
        StrategyDescriptor::new(HANLP_STANDARD, SegmentAlgorithm::Viterbi),
        StrategyDescriptor::new(HANLP_INDEX, SegmentAlgorithm::Viterbi).with_forced_index_mode(),
        StrategyDescriptor::new(HANLP_NLP, SegmentAlgorithm::Perceptron)
            .with_required_resource(PERCEPTRON_CWS_MODEL),
        StrategyDescriptor::new(HANLP_CRF, SegmentAlgorithm::Crf)
            .with_required_resource(CRF_CWS_MODEL),
        StrategyDescriptor::new(HANLP_N_SHORT, SegmentAlgorithm::NShortest),
        StrategyDescriptor::new(HANLP_DIJKSTRA, SegmentAlgorithm::Dijkstra),
        StrategyDescriptor::new(HANLP_SPEED, SegmentAlgorithm::Speed),
    ]
});

/// The default catalog, in registration order.
pub fn default_catalog() -> &'static [StrategyDescriptor] {
    &DEFAULT_CATALOG
}

/// Whether a variant segments with the configured index mode or always in
/// index mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndexMode {
    #[default]
    Configured,
    Forced,
}

/// One registrable variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrategyDescriptor {
    pub name: Cow<'static, str>,
    pub algorithm: SegmentAlgorithm,
    /// A file that must exist for the variant to be registered. Relative
    /// paths are resolved against the home directory.
    pub required_resource: Option<PathBuf>,
    pub index_mode: IndexMode,
}

impl StrategyDescriptor {
    pub fn new<S: Into<Cow<'static, str>>>(name: S, algorithm: SegmentAlgorithm) -> Self {
        StrategyDescriptor {
            name: name.into(),
            algorithm,
            required_resource: None,
            index_mode: IndexMode::Configured,
        }
    }

    /// Gate the variant on `path` existing.
    pub fn with_required_resource<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.required_resource = Some(path.into());
        self
    }

    pub fn with_forced_index_mode(mut self) -> Self {
        self.index_mode = IndexMode::Forced;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_gated(&self) -> bool {
        self.required_resource.is_some()
    }

    pub fn required_resource(&self) -> Option<&Path> {
        self.required_resource.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use ahash::AHashSet;

    use super::*;

    #[test]
    fn test_default_catalog_names() {
        let names: Vec<&str> = default_catalog().iter().map(|d| d.name()).collect();
        assert_eq!(
            names,
            vec![
                "hanlp",
                "hanlp_standard",
                "hanlp_index",
                "hanlp_nlp",
                "hanlp_crf",
                "hanlp_n_short",
                "hanlp_dijkstra",
                "hanlp_speed",
            ]
        );

        let unique: AHashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_gated_variants() {
        let gated: Vec<(&str, &Path)> = default_catalog()
            .iter()
            .filter_map(|d| d.required_resource().map(|p| (d.name(), p)))
            .collect();

        assert_eq!(
            gated,
            vec![
                (HANLP_NLP, Path::new(PERCEPTRON_CWS_MODEL)),
                (HANLP_CRF, Path::new(CRF_CWS_MODEL)),
            ]
        );
        for descriptor in default_catalog() {
            assert_eq!(descriptor.is_gated(), descriptor.algorithm.requires_model());
        }
    }

    #[test]
    fn test_only_index_variant_forces_index_mode() {
        let forced: Vec<&str> = default_catalog()
            .iter()
            .filter(|d| d.index_mode == IndexMode::Forced)
            .map(|d| d.name())
            .collect();
        assert_eq!(forced, vec![HANLP_INDEX]);
    }
}
