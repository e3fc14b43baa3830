//! Analyzer for the registered HanLP variants.

use crate::analysis::analyzer::{Analyzer, TokenStreamComponents};
use crate::analysis::tokenizer::TokenizerFactory;
use crate::analysis::tokenizer::hanlp::HanLpTokenizerFactory;
use crate::config::Configuration;
use crate::error::Result;

/// Builds a fresh segmentation engine and tokenizer for every field analysis.
#[derive(Clone, Debug)]
pub struct HanLpAnalyzer {
    factory: HanLpTokenizerFactory,
}

impl HanLpAnalyzer {
    /// An analyzer that segments with the factory's configuration as is.
    pub fn new(factory: HanLpTokenizerFactory) -> Self {
        HanLpAnalyzer { factory }
    }

    /// An index-time analyzer: index mode is always on, whatever the factory's
    /// configuration says.
    pub fn index(factory: HanLpTokenizerFactory) -> Self {
        let configuration = factory.configuration().with_index_mode(true);
        HanLpAnalyzer {
            factory: factory.with_configuration(configuration),
        }
    }

    /// The configuration snapshot every call segments with.
    pub fn configuration(&self) -> &Configuration {
        self.factory.configuration()
    }

    pub fn tokenizer_factory(&self) -> &HanLpTokenizerFactory {
        &self.factory
    }
}

impl Analyzer for HanLpAnalyzer {
    fn create_components(&self, field_name: &str) -> Result<TokenStreamComponents> {
        let tokenizer = self.factory.create()?;
        Ok(TokenStreamComponents::new(field_name, tokenizer))
    }

    fn name(&self) -> &str {
        self.factory.name()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::analysis::token::Token;
    use crate::error::HanLpError;
    use crate::segment::{Dictionaries, SegmentAlgorithm};

    fn factory(configuration: Configuration) -> HanLpTokenizerFactory {
        HanLpTokenizerFactory::new(
            "hanlp_index",
            SegmentAlgorithm::Viterbi,
            None,
            configuration,
            Arc::new(Dictionaries::builtin()),
        )
    }

    #[test]
    fn test_index_mode_forced() {
        let configuration = Configuration::default();
        assert!(!configuration.enable_index_mode);

        let analyzer = HanLpAnalyzer::index(factory(configuration.clone()));
        assert!(analyzer.configuration().enable_index_mode);

        analyzer.create_components("body").unwrap();
        analyzer.create_components("body").unwrap();
        assert!(analyzer.configuration().enable_index_mode);

        // Forcing again is a no-op.
        let again = HanLpAnalyzer::index(analyzer.tokenizer_factory().clone());
        assert_eq!(again.configuration(), analyzer.configuration());

        // The snapshot it was built from is untouched.
        assert!(!configuration.enable_index_mode);
    }

    #[test]
    fn test_index_analyzer_emits_sub_words() {
        let plain = HanLpAnalyzer::new(factory(Configuration::default()));
        let index = HanLpAnalyzer::index(factory(Configuration::default()));

        let plain_tokens: Vec<Token> = plain.analyze("body", "中华人民共和国").unwrap().collect();
        let index_tokens: Vec<Token> = index.analyze("body", "中华人民共和国").unwrap().collect();

        assert_eq!(plain_tokens.len(), 1);
        assert!(index_tokens.len() > 1);
        assert_eq!(index_tokens[0].text, "中华人民共和国");
        assert!(index_tokens[1..].iter().all(|t| t.position_increment == 0));
    }

    #[test]
    fn test_concurrent_components_are_independent() {
        let analyzer = HanLpAnalyzer::index(factory(Configuration::default()));
        let text = "南京市长江大桥欢迎你";

        let results: Vec<Vec<Token>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    scope.spawn(|| {
                        let components = analyzer.create_components("title").unwrap();
                        components.token_stream(text).unwrap().collect::<Vec<_>>()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results[0], results[1]);
        assert!(!results[0].is_empty());
    }

    #[test]
    fn test_components_carry_field_name() {
        let analyzer = HanLpAnalyzer::new(factory(Configuration::default()));
        let components = analyzer.create_components("title").unwrap();

        assert_eq!(components.field_name(), "title");
        assert_eq!(components.tokenizer().name(), "hanlp");
        assert_eq!(analyzer.name(), "hanlp_index");
    }

    #[test]
    fn test_missing_model_fails_the_call() {
        let factory = HanLpTokenizerFactory::new(
            "hanlp_crf",
            SegmentAlgorithm::Crf,
            Some(PathBuf::from("/nonexistent/cws.txt.bin")),
            Configuration::default(),
            Arc::new(Dictionaries::builtin()),
        );
        let analyzer = HanLpAnalyzer::index(factory);

        let result = analyzer.create_components("body");
        assert!(matches!(result, Err(HanLpError::Resource { .. })));
    }
}
