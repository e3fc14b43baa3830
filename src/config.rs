//! Segmentation configuration and plugin properties.
//!
//! Two layers of configuration are involved when a tokenizer is built:
//!
//! 1. [`HanLpProperties`], loaded once per plugin from
//!    `<home>/config/analysis-hanlp/hanlp.properties` (plus `HANLP_*`
//!    environment variables). It names the dictionary files and carries the
//!    plugin-wide [`Configuration`] defaults.
//! 2. Per-index [`Settings`] given to a provider, overlaid on those defaults
//!    with [`Configuration::merge_settings`].
//!
//! A [`Configuration`] is an immutable snapshot. Index-time analyzers ask for
//! a copy with index mode switched on instead of flipping a shared flag.
//!
//! # Examples
//!
//! ```
//! use analysis_hanlp::config::Configuration;
//!
//! let query_time = Configuration::default();
//! let index_time = query_time.with_index_mode(true);
//!
//! assert!(!query_time.enable_index_mode);
//! assert!(index_time.enable_index_mode);
//! ```

use std::path::PathBuf;

use config::{Config, Environment as EnvironmentSource, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::settings::{Environment, Settings};

/// Default maximum token length, in characters.
pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 255;

/// Segmentation and emission options for one tokenizer/analyzer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Emit the sub-words of long words in addition to the words themselves.
    pub enable_index_mode: bool,

    /// Recognize words missing from the lexicon (HMM).
    pub enable_new_word_recognize: bool,

    /// Merge the custom dictionaries into the lexicon.
    pub enable_custom_dictionary: bool,

    /// Drop stop words.
    pub enable_stop_dictionary: bool,

    /// Fold full-width forms (NFKC) and lowercase token text.
    pub enable_normalization: bool,

    /// Stem Latin-script words with the English (Porter) stemmer.
    pub enable_porter_stemming: bool,

    /// Report character offsets; when disabled all offsets are zero.
    pub enable_offset: bool,

    /// Attach a `pos` attribute to tokens the tagger recognizes.
    pub enable_part_of_speech_tagging: bool,

    /// Tokens longer than this (in characters) are dropped.
    pub max_token_length: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            enable_index_mode: false,
            enable_new_word_recognize: true,
            enable_custom_dictionary: true,
            enable_stop_dictionary: false,
            enable_normalization: false,
            enable_porter_stemming: false,
            enable_offset: true,
            enable_part_of_speech_tagging: false,
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
        }
    }
}

impl Configuration {
    /// Return a copy with index mode set to `enabled`.
    ///
    /// Calling this any number of times with `true` yields equal snapshots.
    pub fn with_index_mode(&self, enabled: bool) -> Self {
        Configuration {
            enable_index_mode: enabled,
            ..self.clone()
        }
    }

    /// Overlay per-index settings on this configuration.
    ///
    /// Keys use the field names of [`Configuration`]; unknown keys are ignored
    /// because the host passes the whole tokenizer/analyzer section.
    pub fn merge_settings(&self, settings: &Settings) -> Result<Self> {
        Ok(Configuration {
            enable_index_mode: settings.get_as_bool("enable_index_mode", self.enable_index_mode)?,
            enable_new_word_recognize: settings
                .get_as_bool("enable_new_word_recognize", self.enable_new_word_recognize)?,
            enable_custom_dictionary: settings
                .get_as_bool("enable_custom_dictionary", self.enable_custom_dictionary)?,
            enable_stop_dictionary: settings
                .get_as_bool("enable_stop_dictionary", self.enable_stop_dictionary)?,
            enable_normalization: settings
                .get_as_bool("enable_normalization", self.enable_normalization)?,
            enable_porter_stemming: settings
                .get_as_bool("enable_porter_stemming", self.enable_porter_stemming)?,
            enable_offset: settings.get_as_bool("enable_offset", self.enable_offset)?,
            enable_part_of_speech_tagging: settings.get_as_bool(
                "enable_part_of_speech_tagging",
                self.enable_part_of_speech_tagging,
            )?,
            max_token_length: settings.get_as_usize("max_token_length", self.max_token_length)?,
        })
    }
}

/// Contents of `hanlp.properties`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HanLpProperties {
    /// Base directory for relative dictionary paths (default: home).
    pub root: Option<PathBuf>,

    /// Replaces the built-in core lexicon.
    pub core_dictionary_path: Option<String>,

    /// Comma-separated list of custom lexicons.
    pub custom_dictionary_path: Option<String>,

    /// Stop word list, one word per line.
    pub core_stop_word_dictionary_path: Option<String>,

    /// Plugin-wide configuration defaults, read from the same flat keys.
    #[serde(skip)]
    pub defaults: Configuration,
}

impl HanLpProperties {
    /// Load the properties for the given environment.
    ///
    /// A missing file is not an error: the built-in defaults apply. A file that
    /// exists but cannot be parsed is.
    pub fn load(env: &Environment) -> Result<Self> {
        let path = env.properties_path();
        debug!(path = %path.display(), "hanlp properties path");

        let source = Config::builder()
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Ini)
                    .required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix("HANLP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut properties: HanLpProperties = source.clone().try_deserialize()?;
        properties.defaults = source.try_deserialize()?;
        Ok(properties)
    }

    /// Directory relative dictionary paths are resolved against.
    pub fn root_dir(&self, env: &Environment) -> PathBuf {
        match &self.root {
            Some(root) => env.resolve(root),
            None => env.home().to_path_buf(),
        }
    }

    /// Core lexicon override, if configured.
    pub fn core_dictionary(&self, env: &Environment) -> Option<PathBuf> {
        self.resolve_one(env, self.core_dictionary_path.as_deref())
    }

    /// Custom lexicons, in declaration order.
    pub fn custom_dictionaries(&self, env: &Environment) -> Vec<PathBuf> {
        let root = self.root_dir(env);
        self.custom_dictionary_path
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| root.join(p))
            .collect()
    }

    /// Stop word list override, if configured.
    pub fn stop_word_dictionary(&self, env: &Environment) -> Option<PathBuf> {
        self.resolve_one(env, self.core_stop_word_dictionary_path.as_deref())
    }

    fn resolve_one(&self, env: &Environment, path: Option<&str>) -> Option<PathBuf> {
        path.map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| self.root_dir(env).join(p))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_index_mode_is_idempotent() {
        let config = Configuration::default();
        let once = config.with_index_mode(true);
        let twice = once.with_index_mode(true);

        assert!(!config.enable_index_mode);
        assert!(once.enable_index_mode);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_settings() {
        let settings = Settings::builder()
            .put("enable_stop_dictionary", "true")
            .put("max_token_length", "8")
            .put("type", "hanlp")
            .build();

        let merged = Configuration::default().merge_settings(&settings).unwrap();
        assert!(merged.enable_stop_dictionary);
        assert_eq!(merged.max_token_length, 8);
        assert!(merged.enable_offset);

        let bad = Settings::builder().put("enable_offset", "maybe").build();
        assert!(Configuration::default().merge_settings(&bad).is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let home = TempDir::new().unwrap();
        let env = Environment::from_home(home.path());

        let properties = HanLpProperties::load(&env).unwrap();
        assert_eq!(properties.defaults, Configuration::default());
        assert!(properties.core_dictionary(&env).is_none());
        assert!(properties.custom_dictionaries(&env).is_empty());
    }

    #[test]
    fn test_load_properties_file() {
        let home = TempDir::new().unwrap();
        let env = Environment::from_home(home.path());
        fs::create_dir_all(env.config_dir()).unwrap();
        fs::write(
            env.properties_path(),
            "# plugin properties\n\
             root = data\n\
             custom_dictionary_path = custom/a.txt, custom/b.txt\n\
             core_stop_word_dictionary_path = stopwords.txt\n\
             enable_stop_dictionary = true\n\
             max_token_length = 32\n",
        )
        .unwrap();

        let properties = HanLpProperties::load(&env).unwrap();
        let root = home.path().join("data");

        assert_eq!(properties.root_dir(&env), root);
        assert_eq!(
            properties.custom_dictionaries(&env),
            vec![root.join("custom/a.txt"), root.join("custom/b.txt")]
        );
        assert_eq!(
            properties.stop_word_dictionary(&env),
            Some(root.join("stopwords.txt"))
        );
        assert!(properties.defaults.enable_stop_dictionary);
        assert_eq!(properties.defaults.max_token_length, 32);
    }
}
