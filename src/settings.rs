//! Host settings and plugin environment.
//!
//! [`Settings`] is the flat key/value view the host hands to the plugin, both
//! at bootstrap (node-level settings such as `path.home`) and per index
//! (tokenizer/analyzer options). [`Environment`] is derived from the node
//! settings once and knows where the plugin's files live.

use std::path::{Path, PathBuf};

use ahash::AHashMap;

use crate::error::{HanLpError, Result};

/// Setting key holding the installation (home) directory.
pub const PATH_HOME_SETTING: &str = "path.home";

/// Name of the plugin, used for its configuration directory.
pub const PLUGIN_NAME: &str = "analysis-hanlp";

/// File name of the properties file inside the plugin's configuration directory.
pub const CONFIG_FILE_NAME: &str = "hanlp.properties";

/// Flat, string-valued settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    values: AHashMap<String, String>,
}

impl Settings {
    /// Create empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building settings.
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// Get a raw value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Get a boolean value, falling back to `default` when the key is absent.
    ///
    /// Accepts `true`/`false` in any case; anything else is a settings error.
    pub fn get_as_bool(&self, key: &str, default: bool) -> Result<bool> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(HanLpError::settings(format!(
                    "failed to parse value [{value}] as only [true] or [false] are allowed for [{key}]"
                ))),
            },
        }
    }

    /// Get an unsigned integer value, falling back to `default` when the key is absent.
    pub fn get_as_usize(&self, key: &str, default: usize) -> Result<usize> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value.trim().parse().map_err(|e| {
                HanLpError::settings(format!("failed to parse value [{value}] for [{key}]: {e}"))
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Builder for [`Settings`].
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    values: AHashMap<String, String>,
}

impl SettingsBuilder {
    /// Put a value, replacing any previous value for the key.
    pub fn put<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.values.insert(key.into(), value.to_string());
        self
    }

    /// Parse a `key=value` pair and put it.
    pub fn put_pair(self, pair: &str) -> Result<Self> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| HanLpError::settings(format!("expected KEY=VALUE, got [{pair}]")))?;
        Ok(self.put(key.trim(), value.trim()))
    }

    pub fn build(self) -> Settings {
        Settings {
            values: self.values,
        }
    }
}

/// The plugin's view of its installation.
#[derive(Clone, Debug)]
pub struct Environment {
    home: PathBuf,
}

impl Environment {
    /// Derive the environment from node settings.
    ///
    /// Fails when `path.home` is missing or empty; there is no degraded mode.
    pub fn new(settings: &Settings) -> Result<Self> {
        let home = settings
            .get(PATH_HOME_SETTING)
            .filter(|home| !home.trim().is_empty())
            .ok_or_else(|| {
                HanLpError::settings(format!("{PATH_HOME_SETTING} is not configured"))
            })?;

        Ok(Environment {
            home: PathBuf::from(home),
        })
    }

    /// Create an environment rooted at the given home directory.
    pub fn from_home<P: Into<PathBuf>>(home: P) -> Self {
        Environment { home: home.into() }
    }

    /// The installation directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// `<home>/config/analysis-hanlp`
    pub fn config_dir(&self) -> PathBuf {
        self.home.join("config").join(PLUGIN_NAME)
    }

    /// `<home>/config/analysis-hanlp/hanlp.properties`
    pub fn properties_path(&self) -> PathBuf {
        self.config_dir().join(CONFIG_FILE_NAME)
    }

    /// Resolve a path against the home directory unless it is already absolute.
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.home.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_home_is_fatal() {
        let err = Environment::new(&Settings::new()).unwrap_err();
        assert!(matches!(err, HanLpError::Settings(_)));
        assert_eq!(err.to_string(), "Settings error: path.home is not configured");

        let blank = Settings::builder().put(PATH_HOME_SETTING, "  ").build();
        assert!(Environment::new(&blank).is_err());
    }

    #[test]
    fn test_properties_path() {
        let settings = Settings::builder()
            .put(PATH_HOME_SETTING, "/usr/share/search")
            .build();
        let env = Environment::new(&settings).unwrap();

        assert_eq!(
            env.properties_path(),
            PathBuf::from("/usr/share/search/config/analysis-hanlp/hanlp.properties")
        );
    }

    #[test]
    fn test_resolve() {
        let env = Environment::from_home("/opt/search");
        assert_eq!(
            env.resolve("plugins/model.bin"),
            PathBuf::from("/opt/search/plugins/model.bin")
        );
        assert_eq!(env.resolve("/models/nlp.bin"), PathBuf::from("/models/nlp.bin"));
    }

    #[test]
    fn test_typed_getters() {
        let settings = Settings::builder()
            .put("enable_index_mode", "TRUE")
            .put("max_token_length", 16)
            .put("broken", "yes")
            .build();

        assert!(settings.get_as_bool("enable_index_mode", false).unwrap());
        assert!(settings.get_as_bool("missing", true).unwrap());
        assert!(settings.get_as_bool("broken", false).is_err());
        assert_eq!(settings.get_as_usize("max_token_length", 255).unwrap(), 16);
        assert_eq!(settings.get_as_usize("missing", 255).unwrap(), 255);
    }

    #[test]
    fn test_put_pair() {
        let settings = Settings::builder()
            .put_pair("enable_offset = false")
            .unwrap()
            .build();
        assert_eq!(settings.get("enable_offset"), Some("false"));
        assert!(Settings::builder().put_pair("no-equals").is_err());
    }
}
