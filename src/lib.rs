//! # analysis-hanlp
//!
//! Chinese word segmentation tokenizers and analyzers for full-text search
//! analysis pipelines.
//!
//! ## Features
//!
//! - A fixed catalog of named variants (`hanlp`, `hanlp_index`, `hanlp_nlp`, ...)
//! - Model-gated variants registered only when their model file exists
//! - Fresh segmentation engine per analysis over shared, lazily loaded lexicons
//! - Index mode with overlapping sub-words at shared positions
//! - Stop words, normalization and stemming filters

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod plugin;
pub mod segment;
pub mod settings;

pub mod prelude {
    pub use crate::analysis::analyzer::{Analyzer, TokenStreamComponents};
    pub use crate::analysis::token::{Token, TokenStream, TokenType};
    pub use crate::analysis::tokenizer::{Tokenizer, TokenizerFactory};
    pub use crate::config::Configuration;
    pub use crate::error::{HanLpError, Result};
    pub use crate::plugin::{AnalysisPlugin, HanLpPlugin};
    pub use crate::settings::Settings;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
