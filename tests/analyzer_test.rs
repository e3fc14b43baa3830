use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use tempfile::TempDir;

use analysis_hanlp::analysis::analyzer::Analyzer;
use analysis_hanlp::analysis::token::{Token, TokenType};
use analysis_hanlp::error::Result;
use analysis_hanlp::plugin::HanLpPlugin;
use analysis_hanlp::plugin::catalog::{
    HANLP, HANLP_DIJKSTRA, HANLP_INDEX, HANLP_N_SHORT, HANLP_SPEED, HANLP_STANDARD,
};
use analysis_hanlp::settings::{Environment, Settings};

fn plugin(home: &Path) -> Result<HanLpPlugin> {
    HanLpPlugin::new(&Settings::builder().put("path.home", home.display()).build())
}

fn write_properties(home: &Path, contents: &str) -> Result<()> {
    let env = Environment::from_home(home);
    fs::create_dir_all(env.config_dir())?;
    fs::write(env.properties_path(), contents)?;
    Ok(())
}

fn analyze(analyzer: &dyn Analyzer, text: &str) -> Result<Vec<Token>> {
    Ok(analyzer.analyze("content", text)?.collect())
}

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

#[test]
fn every_ungated_variant_covers_the_text() -> Result<()> {
    let home = TempDir::new()?;
    let plugin = plugin(home.path())?;
    let text = "南京市长江大桥";

    for name in [HANLP, HANLP_STANDARD, HANLP_N_SHORT, HANLP_DIJKSTRA, HANLP_SPEED] {
        let analyzer = plugin.analyzer(name, &Settings::new())?;
        let tokens = analyze(analyzer.as_ref(), text)?;

        assert_eq!(texts(&tokens).concat(), text, "{name}");
        for token in &tokens {
            assert_eq!(&text[token.start_offset..token.end_offset], token.text, "{name}");
            assert_eq!(token.position_increment, 1, "{name}");
        }
    }
    Ok(())
}

#[test]
fn index_variant_emits_overlapping_sub_words() -> Result<()> {
    let home = TempDir::new()?;
    let plugin = plugin(home.path())?;
    let text = "中华人民共和国国歌";

    let analyzer = plugin.analyzer(HANLP_INDEX, &Settings::new())?;
    let tokens = analyze(analyzer.as_ref(), text)?;

    let whole = tokens
        .iter()
        .find(|t| t.text == "中华人民共和国")
        .expect("the whole word is kept");
    assert_eq!(whole.position_increment, 1);
    assert!(
        tokens
            .iter()
            .any(|t| t.text == "人民" && t.position == whole.position && t.position_increment == 0)
    );

    // The tokenizer for the same name is forced into index mode as well.
    let tokenizer = plugin.tokenizer(HANLP_INDEX, &Settings::new())?.create()?;
    let from_tokenizer: Vec<Token> = tokenizer.tokenize(text)?.collect();
    assert_eq!(from_tokenizer, tokens);
    Ok(())
}

#[test]
fn index_settings_enable_index_mode_for_other_variants() -> Result<()> {
    let home = TempDir::new()?;
    let plugin = plugin(home.path())?;
    let text = "中华人民共和国";

    let plain = plugin.analyzer(HANLP, &Settings::new())?;
    let index_settings = Settings::builder().put("enable_index_mode", true).build();
    let index = plugin.analyzer(HANLP, &index_settings)?;

    assert_eq!(analyze(plain.as_ref(), text)?.len(), 1);
    assert!(analyze(index.as_ref(), text)?.len() > 1);
    Ok(())
}

#[test]
fn custom_dictionary_from_properties() -> Result<()> {
    let home = TempDir::new()?;
    fs::write(home.path().join("custom.txt"), "长江大桥欢迎你 10000 n\n")?;
    write_properties(
        home.path(),
        "custom_dictionary_path = custom.txt, missing.txt\nenable_new_word_recognize = false\n",
    )?;
    let plugin = plugin(home.path())?;

    let with_custom = plugin.analyzer(HANLP, &Settings::new())?;
    assert!(texts(&analyze(with_custom.as_ref(), "南京长江大桥欢迎你")?).contains(&"长江大桥欢迎你"));

    let settings = Settings::builder()
        .put("enable_custom_dictionary", false)
        .build();
    let without_custom = plugin.analyzer(HANLP, &settings)?;
    assert!(!texts(&analyze(without_custom.as_ref(), "南京长江大桥欢迎你")?).contains(&"长江大桥欢迎你"));
    Ok(())
}

#[test]
fn stop_word_dictionary_from_properties() -> Result<()> {
    let home = TempDir::new()?;
    fs::write(home.path().join("stopwords.txt"), "# stop words\n北京\n")?;
    write_properties(
        home.path(),
        "core_stop_word_dictionary_path = stopwords.txt\nenable_stop_dictionary = true\n",
    )?;
    let plugin = plugin(home.path())?;

    let analyzer = plugin.analyzer(HANLP, &Settings::new())?;
    let tokens = analyze(analyzer.as_ref(), "我爱北京天安门")?;

    assert!(!texts(&tokens).contains(&"北京"));
    // 的 is not in this list.
    let tokens = analyze(analyzer.as_ref(), "我的书")?;
    assert!(texts(&tokens).contains(&"的"));
    Ok(())
}

#[test]
fn tagging_normalization_and_offsets() -> Result<()> {
    let home = TempDir::new()?;
    let plugin = plugin(home.path())?;
    let settings = Settings::builder()
        .put("enable_part_of_speech_tagging", true)
        .put("enable_normalization", true)
        .put("enable_offset", false)
        .build();

    let analyzer = plugin.analyzer(HANLP_STANDARD, &settings)?;
    let tokens = analyze(analyzer.as_ref(), "我爱北京")?;

    let beijing = tokens.iter().find(|t| t.text == "北京").expect("北京 is a word");
    assert_eq!(beijing.part_of_speech(), Some("ns"));
    assert_eq!(beijing.token_type(), Some(TokenType::Cjk));
    assert!(tokens.iter().all(|t| t.start_offset == 0 && t.end_offset == 0));
    Ok(())
}

#[test]
fn max_token_length_drops_long_words() -> Result<()> {
    let home = TempDir::new()?;
    let plugin = plugin(home.path())?;
    let settings = Settings::builder().put("max_token_length", 3).build();

    let analyzer = plugin.analyzer(HANLP, &settings)?;
    let tokens = analyze(analyzer.as_ref(), "中华人民共和国成立")?;

    assert!(tokens.iter().all(|t| t.char_len() <= 3));
    Ok(())
}

#[test]
fn concurrent_analysis_is_independent() -> Result<()> {
    let home = TempDir::new()?;
    let plugin = plugin(home.path())?;
    let analyzer: Arc<dyn Analyzer> = plugin.analyzer(HANLP_INDEX, &Settings::new())?;
    let text = "结婚的和尚未结婚的都应该来参加";

    let expected = analyze(analyzer.as_ref(), text)?;
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            thread::spawn(move || -> Result<Vec<Token>> {
                let components = analyzer.create_components("content")?;
                Ok(components.token_stream(text)?.collect())
            })
        })
        .collect();

    for handle in handles {
        let tokens = handle.join().expect("analysis thread panicked")?;
        assert_eq!(tokens, expected);
    }
    Ok(())
}
