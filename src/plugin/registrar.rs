//! Decides which variants are exposed.
//!
//! Registration walks a catalog once. Variants without a required resource
//! are always registered; gated variants are registered only when their
//! resource probes as available. A missing resource never fails the plugin:
//! the variant is left out and a warning names it.

use std::path::PathBuf;

use ahash::AHashMap;
use tracing::{debug, warn};

use crate::plugin::catalog::StrategyDescriptor;
use crate::plugin::probe::AvailabilityProber;
use crate::plugin::provider::{AnalyzerProvider, ProviderPort, TokenizerProvider};

/// A registered variant: its descriptor and both of its providers.
#[derive(Clone)]
pub struct Registration {
    descriptor: StrategyDescriptor,
    tokenizer: TokenizerProvider,
    analyzer: AnalyzerProvider,
}

impl Registration {
    pub fn descriptor(&self) -> &StrategyDescriptor {
        &self.descriptor
    }

    pub fn tokenizer(&self) -> &TokenizerProvider {
        &self.tokenizer
    }

    pub fn analyzer(&self) -> &AnalyzerProvider {
        &self.analyzer
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Registered variants by name. Read-only once built.
#[derive(Clone, Debug, Default)]
pub struct RegistrationTable {
    entries: AHashMap<String, Registration>,
}

impl RegistrationTable {
    pub fn get(&self, name: &str) -> Option<&Registration> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The host's tokenizer mapping.
    pub fn tokenizers(&self) -> AHashMap<String, TokenizerProvider> {
        self.entries
            .iter()
            .map(|(name, r)| (name.clone(), r.tokenizer.clone()))
            .collect()
    }

    /// The host's analyzer mapping.
    pub fn analyzers(&self) -> AHashMap<String, AnalyzerProvider> {
        self.entries
            .iter()
            .map(|(name, r)| (name.clone(), r.analyzer.clone()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Registration)> {
        self.entries.iter().map(|(name, r)| (name.as_str(), r))
    }
}

/// Builds a [`RegistrationTable`] from a catalog.
pub struct Registrar {
    prober: Box<dyn AvailabilityProber>,
    base_dir: PathBuf,
}

impl Registrar {
    /// Relative resource paths are resolved against `base_dir`.
    pub fn new<P, B>(prober: P, base_dir: B) -> Self
    where
        P: AvailabilityProber + 'static,
        B: Into<PathBuf>,
    {
        Registrar {
            prober: Box::new(prober),
            base_dir: base_dir.into(),
        }
    }

    /// Register every usable variant of `catalog`, in catalog order.
    ///
    /// Never fails. The first descriptor of a duplicated name wins.
    pub fn register(
        &self,
        catalog: &[StrategyDescriptor],
        port: &dyn ProviderPort,
    ) -> RegistrationTable {
        let mut entries = AHashMap::with_capacity(catalog.len());

        for descriptor in catalog {
            if entries.contains_key(descriptor.name()) {
                warn!(variant = %descriptor.name, "duplicate variant name, keeping the first");
                continue;
            }

            if let Some(resource) = descriptor.required_resource() {
                let path = if resource.is_absolute() {
                    resource.to_path_buf()
                } else {
                    self.base_dir.join(resource)
                };
                if !self.prober.probe(&path) {
                    warn!(
                        variant = %descriptor.name,
                        path = %path.display(),
                        "can not find {} model, tokenizer and analyzer [{}] are not available",
                        descriptor.algorithm.name(),
                        descriptor.name,
                    );
                    continue;
                }
                debug!(variant = %descriptor.name, path = %path.display(), "found model");
            }

            let registration = Registration {
                descriptor: descriptor.clone(),
                tokenizer: port.tokenizer_provider(descriptor),
                analyzer: port.analyzer_provider(descriptor),
            };
            entries.insert(descriptor.name().to_string(), registration);
        }

        RegistrationTable { entries }
    }
}

impl std::fmt::Debug for Registrar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registrar")
            .field("base_dir", &self.base_dir)
            .finish_non_exhaustive()
    }
}
