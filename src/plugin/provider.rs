//! Providers handed to the host.
//!
//! The host keeps one provider per registered name and asks it for a
//! tokenizer factory or an analyzer whenever an index refers to that name.
//! [`ProviderPort`] is the seam between the registrar and whatever builds
//! those providers, so registration can be exercised without real engines.

use std::path::PathBuf;
use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, HanLpAnalyzer};
use crate::analysis::tokenizer::{HanLpTokenizerFactory, TokenizerFactory};
use crate::config::Configuration;
use crate::error::Result;
use crate::plugin::catalog::{IndexMode, StrategyDescriptor};
use crate::segment::{Dictionaries, SegmentAlgorithm};
use crate::settings::Settings;

/// Produces `T` for an index's analysis settings.
pub trait AnalysisProvider<T>: Send + Sync {
    /// Build a `T` named `name` from the index's settings for it.
    fn get(&self, index_settings: &Settings, name: &str) -> Result<T>;
}

pub type TokenizerProvider = Arc<dyn AnalysisProvider<Box<dyn TokenizerFactory>>>;
pub type AnalyzerProvider = Arc<dyn AnalysisProvider<Arc<dyn Analyzer>>>;

/// Builds the provider pair for a descriptor.
pub trait ProviderPort: Send + Sync {
    fn tokenizer_provider(&self, descriptor: &StrategyDescriptor) -> TokenizerProvider;
    fn analyzer_provider(&self, descriptor: &StrategyDescriptor) -> AnalyzerProvider;
}

/// Provider for one HanLP variant.
///
/// Per-index settings are merged over the plugin-wide configuration on every
/// call; the plugin configuration itself never changes.
#[derive(Clone, Debug)]
pub struct HanLpProvider {
    algorithm: SegmentAlgorithm,
    model: Option<PathBuf>,
    index_mode: IndexMode,
    configuration: Configuration,
    dictionaries: Arc<Dictionaries>,
}

impl HanLpProvider {
    pub fn new(
        descriptor: &StrategyDescriptor,
        configuration: Configuration,
        dictionaries: Arc<Dictionaries>,
    ) -> Self {
        HanLpProvider {
            algorithm: descriptor.algorithm,
            model: descriptor.required_resource().map(|p| dictionaries.resolve(p)),
            index_mode: descriptor.index_mode,
            configuration,
            dictionaries,
        }
    }

    fn factory(&self, index_settings: &Settings, name: &str) -> Result<HanLpTokenizerFactory> {
        Ok(HanLpTokenizerFactory::new(
            name,
            self.algorithm,
            self.model.clone(),
            self.configuration.merge_settings(index_settings)?,
            Arc::clone(&self.dictionaries),
        ))
    }

    fn analyzer(&self, index_settings: &Settings, name: &str) -> Result<HanLpAnalyzer> {
        let factory = self.factory(index_settings, name)?;
        Ok(match self.index_mode {
            IndexMode::Forced => HanLpAnalyzer::index(factory),
            IndexMode::Configured => HanLpAnalyzer::new(factory),
        })
    }
}

impl AnalysisProvider<Box<dyn TokenizerFactory>> for HanLpProvider {
    /// The tokenizer of a forced variant is the one its index analyzer uses.
    fn get(&self, index_settings: &Settings, name: &str) -> Result<Box<dyn TokenizerFactory>> {
        let factory = match self.index_mode {
            IndexMode::Forced => self.analyzer(index_settings, name)?.tokenizer_factory().clone(),
            IndexMode::Configured => self.factory(index_settings, name)?,
        };
        Ok(Box::new(factory))
    }
}

impl AnalysisProvider<Arc<dyn Analyzer>> for HanLpProvider {
    fn get(&self, index_settings: &Settings, name: &str) -> Result<Arc<dyn Analyzer>> {
        Ok(Arc::new(self.analyzer(index_settings, name)?))
    }
}

/// The production port: every descriptor gets a [`HanLpProvider`] over the
/// plugin's shared dictionaries.
#[derive(Clone, Debug)]
pub struct HanLpProviderPort {
    configuration: Configuration,
    dictionaries: Arc<Dictionaries>,
}

impl HanLpProviderPort {
    pub fn new(configuration: Configuration, dictionaries: Arc<Dictionaries>) -> Self {
        HanLpProviderPort {
            configuration,
            dictionaries,
        }
    }

    fn provider(&self, descriptor: &StrategyDescriptor) -> Arc<HanLpProvider> {
        Arc::new(HanLpProvider::new(
            descriptor,
            self.configuration.clone(),
            Arc::clone(&self.dictionaries),
        ))
    }
}

impl ProviderPort for HanLpProviderPort {
    fn tokenizer_provider(&self, descriptor: &StrategyDescriptor) -> TokenizerProvider {
        self.provider(descriptor)
    }

    fn analyzer_provider(&self, descriptor: &StrategyDescriptor) -> AnalyzerProvider {
        self.provider(descriptor)
    }
}
