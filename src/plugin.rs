//! The analysis plugin.
//!
//! Constructing a [`HanLpPlugin`] validates the node settings, loads
//! `hanlp.properties` and registers every usable variant of the catalog. The
//! host then reads the two name-keyed mappings through [`AnalysisPlugin`].
//!
//! # Examples
//!
//! ```no_run
//! use analysis_hanlp::plugin::{AnalysisPlugin, HanLpPlugin};
//! use analysis_hanlp::settings::Settings;
//!
//! let settings = Settings::builder().put("path.home", "/usr/share/search").build();
//! let plugin = HanLpPlugin::new(&settings).unwrap();
//!
//! let analyzer = plugin.analyzer("hanlp_index", &Settings::new()).unwrap();
//! let tokens: Vec<_> = analyzer.analyze("content", "南京市长江大桥").unwrap().collect();
//! assert!(!tokens.is_empty());
//! ```

use std::sync::Arc;

use ahash::AHashMap;
use tracing::{debug, info};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::tokenizer::TokenizerFactory;
use crate::config::{Configuration, HanLpProperties};
use crate::error::{HanLpError, Result};
use crate::segment::Dictionaries;
use crate::settings::{Environment, Settings};

pub mod catalog;
pub mod probe;
pub mod provider;
pub mod registrar;

pub use catalog::{IndexMode, StrategyDescriptor, default_catalog};
pub use probe::{AvailabilityProber, FileSystemProber};
pub use provider::{
    AnalysisProvider, AnalyzerProvider, HanLpProvider, HanLpProviderPort, ProviderPort,
    TokenizerProvider,
};
pub use registrar::{Registrar, Registration, RegistrationTable};

/// What the host reads from an analysis plugin.
pub trait AnalysisPlugin {
    /// Tokenizer providers by name.
    fn tokenizers(&self) -> AHashMap<String, TokenizerProvider>;

    /// Analyzer providers by name.
    fn analyzers(&self) -> AHashMap<String, AnalyzerProvider>;
}

/// The HanLP analysis plugin.
#[derive(Debug)]
pub struct HanLpPlugin {
    env: Environment,
    properties: HanLpProperties,
    dictionaries: Arc<Dictionaries>,
    registrations: RegistrationTable,
}

impl HanLpPlugin {
    /// Create the plugin from node settings with the default catalog.
    ///
    /// Fails when `path.home` is missing or the properties file is invalid.
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_catalog(settings, default_catalog(), FileSystemProber)
    }

    /// Create the plugin with a custom catalog and prober.
    pub fn with_catalog<P>(
        settings: &Settings,
        catalog: &[StrategyDescriptor],
        prober: P,
    ) -> Result<Self>
    where
        P: AvailabilityProber + 'static,
    {
        let env = Environment::new(settings)?;
        debug!(path = %env.properties_path().display(), "hanlp properties path");

        let properties = HanLpProperties::load(&env)?;
        let dictionaries = Arc::new(Dictionaries::new(&properties, &env));

        let port = HanLpProviderPort::new(properties.defaults.clone(), Arc::clone(&dictionaries));
        let registrations = Registrar::new(prober, env.home()).register(catalog, &port);

        info!(
            home = %env.home().display(),
            registered = registrations.len(),
            skipped = catalog.len() - registrations.len(),
            "loaded hanlp analysis plugin"
        );

        Ok(HanLpPlugin {
            env,
            properties,
            dictionaries,
            registrations,
        })
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn properties(&self) -> &HanLpProperties {
        &self.properties
    }

    /// Plugin-wide configuration defaults.
    pub fn configuration(&self) -> &Configuration {
        &self.properties.defaults
    }

    pub fn dictionaries(&self) -> &Arc<Dictionaries> {
        &self.dictionaries
    }

    pub fn registrations(&self) -> &RegistrationTable {
        &self.registrations
    }

    /// Get a tokenizer factory for a registered name.
    pub fn tokenizer(&self, name: &str, index_settings: &Settings) -> Result<Box<dyn TokenizerFactory>> {
        self.registration(name)?
            .tokenizer()
            .get(index_settings, name)
    }

    /// Get an analyzer for a registered name.
    pub fn analyzer(&self, name: &str, index_settings: &Settings) -> Result<Arc<dyn Analyzer>> {
        self.registration(name)?.analyzer().get(index_settings, name)
    }

    fn registration(&self, name: &str) -> Result<&Registration> {
        self.registrations
            .get(name)
            .ok_or_else(|| HanLpError::not_found(format!("no tokenizer or analyzer named [{name}]")))
    }
}

impl AnalysisPlugin for HanLpPlugin {
    fn tokenizers(&self) -> AHashMap<String, TokenizerProvider> {
        self.registrations.tokenizers()
    }

    fn analyzers(&self) -> AHashMap<String, AnalyzerProvider> {
        self.registrations.analyzers()
    }
}
