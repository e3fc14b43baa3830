//! Shared lexicons and stop words.
//!
//! Lexicons are expensive to build, so they are loaded on first use and kept
//! for the life of the plugin. Segmenters hold an `Arc` to the lexicon they
//! were built from; a lexicon is never mutated after it has been cached.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use ahash::{AHashMap, AHashSet};
use jieba_rs::Jieba;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::config::HanLpProperties;
use crate::error::{HanLpError, Result};
use crate::settings::Environment;

/// The lexicon bundled with the segmentation library.
static BUILTIN_LEXICON: LazyLock<Arc<Jieba>> = LazyLock::new(|| Arc::new(Jieba::new()));

/// Stop words used when no stop word dictionary is configured.
const DEFAULT_STOP_WORDS: &[&str] = &[
    "的", "了", "和", "是", "就", "都", "而", "及", "与", "着", "或", "一个", "没有", "我们",
    "你们", "他们", "它们", "这", "那", "之", "在", "也", "把", "被", "让", "从", "向", "对",
    "给", "以", "为", "于", "上", "下", "中", "啊", "吧", "呢", "吗", "嘛", "呀", "哦", "，",
    "。", "、", "；", "：", "？", "！", "“", "”", "‘", "’", "（", "）", "《", "》", "a", "an",
    "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it", "no",
    "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these", "they",
    "this", "to", "was", "will", "with",
];

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum LexiconKey {
    Core { custom: bool },
    Model { path: PathBuf, custom: bool },
}

/// Lexicons and word lists shared by every segmenter of a plugin.
pub struct Dictionaries {
    base_dir: PathBuf,
    core_dictionary: Option<PathBuf>,
    custom_dictionaries: Vec<PathBuf>,
    stop_word_dictionary: Option<PathBuf>,
    lexicons: RwLock<AHashMap<LexiconKey, Arc<Jieba>>>,
    stop_words: RwLock<Option<Arc<AHashSet<String>>>>,
}

impl Dictionaries {
    /// Dictionaries described by the plugin properties.
    ///
    /// Model paths are resolved against the home directory.
    pub fn new(properties: &HanLpProperties, env: &Environment) -> Self {
        Dictionaries {
            base_dir: env.home().to_path_buf(),
            core_dictionary: properties.core_dictionary(env),
            custom_dictionaries: properties.custom_dictionaries(env),
            stop_word_dictionary: properties.stop_word_dictionary(env),
            lexicons: RwLock::new(AHashMap::new()),
            stop_words: RwLock::new(None),
        }
    }

    /// Only the built-in lexicon and stop words; relative model paths resolve
    /// against the working directory.
    pub fn builtin() -> Self {
        Dictionaries {
            base_dir: PathBuf::new(),
            core_dictionary: None,
            custom_dictionaries: Vec::new(),
            stop_word_dictionary: None,
            lexicons: RwLock::new(AHashMap::new()),
            stop_words: RwLock::new(None),
        }
    }

    /// Add custom dictionaries.
    pub fn with_custom_dictionaries<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.custom_dictionaries
            .extend(paths.into_iter().map(Into::into));
        self
    }

    /// Use a stop word dictionary instead of the built-in list.
    pub fn with_stop_word_dictionary<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.stop_word_dictionary = Some(path.into());
        self
    }

    /// Resolve a resource path the same way model lexicons are resolved.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Get the lexicon for a model (or the core lexicon when `model` is `None`),
    /// optionally merged with the custom dictionaries.
    pub fn lexicon(&self, model: Option<&Path>, with_custom: bool) -> Result<Arc<Jieba>> {
        let custom = with_custom && !self.custom_dictionaries.is_empty();
        let key = match model {
            Some(path) => LexiconKey::Model {
                path: self.resolve(path),
                custom,
            },
            None if self.core_dictionary.is_none() && !custom => {
                return Ok(Arc::clone(&BUILTIN_LEXICON));
            }
            None => LexiconKey::Core { custom },
        };

        if let Some(lexicon) = self.lexicons.read().get(&key) {
            return Ok(Arc::clone(lexicon));
        }

        let lexicon = Arc::new(self.load(&key)?);
        let mut lexicons = self.lexicons.write();
        Ok(Arc::clone(lexicons.entry(key).or_insert(lexicon)))
    }

    /// The stop word set, loaded on first use.
    pub fn stop_words(&self) -> Result<Arc<AHashSet<String>>> {
        if let Some(words) = self.stop_words.read().as_ref() {
            return Ok(Arc::clone(words));
        }

        let words = Arc::new(match &self.stop_word_dictionary {
            Some(path) => load_word_list(path)?,
            None => DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        });
        let mut guard = self.stop_words.write();
        Ok(Arc::clone(guard.get_or_insert(words)))
    }

    fn load(&self, key: &LexiconKey) -> Result<Jieba> {
        let (mut lexicon, custom) = match key {
            LexiconKey::Core { custom } => match &self.core_dictionary {
                Some(path) => (load_lexicon(path)?, *custom),
                None => (Jieba::new(), *custom),
            },
            LexiconKey::Model { path, custom } => (load_lexicon(path)?, *custom),
        };

        if custom {
            for path in &self.custom_dictionaries {
                match File::open(path) {
                    Ok(file) => {
                        lexicon
                            .load_dict(&mut BufReader::new(file))
                            .map_err(|e| HanLpError::resource(path, e.to_string()))?;
                        debug!(path = %path.display(), "loaded custom dictionary");
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "skipping custom dictionary");
                    }
                }
            }
        }

        Ok(lexicon)
    }
}

impl std::fmt::Debug for Dictionaries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionaries")
            .field("base_dir", &self.base_dir)
            .field("core_dictionary", &self.core_dictionary)
            .field("custom_dictionaries", &self.custom_dictionaries)
            .field("stop_word_dictionary", &self.stop_word_dictionary)
            .field("cached_lexicons", &self.lexicons.read().len())
            .finish()
    }
}

/// Load a lexicon in `word [freq] [tag]` line format.
fn load_lexicon(path: &Path) -> Result<Jieba> {
    let file = File::open(path).map_err(|e| HanLpError::resource(path, e.to_string()))?;
    let mut lexicon = Jieba::empty();
    lexicon
        .load_dict(&mut BufReader::new(file))
        .map_err(|e| HanLpError::resource(path, e.to_string()))?;
    debug!(path = %path.display(), "loaded lexicon");
    Ok(lexicon)
}

/// One word per line; blank lines and `#` comments are skipped.
fn load_word_list(path: &Path) -> Result<AHashSet<String>> {
    let file = File::open(path).map_err(|e| HanLpError::resource(path, e.to_string()))?;
    let mut words = AHashSet::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| HanLpError::resource(path, e.to_string()))?;
        let word = line.trim();
        if !word.is_empty() && !word.starts_with('#') {
            words.insert(word.to_string());
        }
    }
    debug!(path = %path.display(), count = words.len(), "loaded stop words");
    Ok(words)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_builtin_lexicon_is_shared() {
        let dictionaries = Dictionaries::builtin();
        let a = dictionaries.lexicon(None, true).unwrap();
        let b = dictionaries.lexicon(None, false).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_model_lexicon_is_cached() {
        let dir = TempDir::new().unwrap();
        let model = dir.path().join("cws.bin");
        fs::write(&model, "分词 100 n\n模型 100 n\n").unwrap();

        let dictionaries = Dictionaries::builtin();
        let a = dictionaries.lexicon(Some(&model), true).unwrap();
        let b = dictionaries.lexicon(Some(&model), true).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_missing_model_is_resource_error() {
        let dictionaries = Dictionaries::builtin();
        let result = dictionaries.lexicon(Some(Path::new("/nonexistent/cws.bin")), true);
        assert!(matches!(result, Err(HanLpError::Resource { .. })));
    }

    #[test]
    fn test_missing_custom_dictionary_is_skipped() {
        let dictionaries =
            Dictionaries::builtin().with_custom_dictionaries(["/nonexistent/custom.txt"]);
        assert!(dictionaries.lexicon(None, true).is_ok());
    }

    #[test]
    fn test_stop_words() {
        let builtin = Dictionaries::builtin().stop_words().unwrap();
        assert!(builtin.contains("的"));
        assert!(builtin.contains("the"));

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stopwords.txt");
        fs::write(&path, "# comment\n这个\n\n那个\n").unwrap();

        let custom = Dictionaries::builtin()
            .with_stop_word_dictionary(&path)
            .stop_words()
            .unwrap();
        assert_eq!(custom.len(), 2);
        assert!(custom.contains("这个"));
        assert!(!custom.contains("的"));
    }
}
