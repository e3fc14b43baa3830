//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::token::{Token, TokenType};
use crate::cli::args::{HanLpArgs, OutputFormat};
use crate::error::Result;

/// One catalog variant.
#[derive(Debug, Serialize, Deserialize)]
pub struct VariantInfo {
    pub name: String,
    pub algorithm: String,
    pub index_mode: bool,
    pub required_resource: Option<String>,
    pub available: bool,
}

/// Result structure for the list command.
#[derive(Debug, Serialize, Deserialize)]
pub struct VariantList {
    pub variants: Vec<VariantInfo>,
}

/// A token as printed by the analyze command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenInfo {
    pub text: String,
    pub position: usize,
    pub position_increment: usize,
    pub start_offset: usize,
    pub end_offset: usize,
    pub token_type: Option<TokenType>,
    pub part_of_speech: Option<String>,
}

impl From<&Token> for TokenInfo {
    fn from(token: &Token) -> Self {
        TokenInfo {
            text: token.text.clone(),
            position: token.position,
            position_increment: token.position_increment,
            start_offset: token.start_offset,
            end_offset: token.end_offset,
            token_type: token.token_type(),
            part_of_speech: token.part_of_speech().map(str::to_string),
        }
    }
}

/// Result structure for the analyze command.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub name: String,
    pub field: String,
    pub tokens: Vec<TokenInfo>,
    pub duration_ms: u64,
}

/// Results that know how to print themselves for humans.
pub trait HumanOutput {
    fn print_human(&self);
}

impl HumanOutput for VariantList {
    fn print_human(&self) {
        println!("{:<16} {:<12} {:<6} {:<10}", "NAME", "ALGORITHM", "INDEX", "STATUS");
        for variant in &self.variants {
            let status = if variant.available {
                "available"
            } else {
                "missing"
            };
            println!(
                "{:<16} {:<12} {:<6} {:<10}",
                variant.name,
                variant.algorithm,
                if variant.index_mode { "yes" } else { "-" },
                status
            );
            if !variant.available
                && let Some(resource) = &variant.required_resource
            {
                println!("    model not found: {resource}");
            }
        }
    }
}

impl HumanOutput for AnalysisResult {
    fn print_human(&self) {
        if self.tokens.is_empty() {
            println!("No tokens.");
            return;
        }

        for token in &self.tokens {
            // Sub-words are indented under the word they belong to.
            let indent = if token.position_increment == 0 { "  " } else { "" };
            let mut line = format!(
                "{:>4}  {indent}{}  [{}..{})",
                token.position, token.text, token.start_offset, token.end_offset
            );
            if let Some(token_type) = token.token_type {
                line.push_str(&format!("  {token_type:?}"));
            }
            if let Some(pos) = &token.part_of_speech {
                line.push_str(&format!("  /{pos}"));
            }
            println!("{line}");
        }
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &HanLpArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
                println!();
            }
            result.print_human();
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &HanLpArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::POS_ATTRIBUTE;

    #[test]
    fn test_token_info_from_token() {
        let token = Token::with_offsets("北京", 2, 6, 12)
            .with_token_type(TokenType::Cjk)
            .with_attribute(POS_ATTRIBUTE, "ns")
            .with_position_increment(0);

        let info = TokenInfo::from(&token);

        assert_eq!(info.text, "北京");
        assert_eq!(info.position, 2);
        assert_eq!(info.position_increment, 0);
        assert_eq!((info.start_offset, info.end_offset), (6, 12));
        assert_eq!(info.token_type, Some(TokenType::Cjk));
        assert_eq!(info.part_of_speech.as_deref(), Some("ns"));
    }

    #[test]
    fn test_analysis_result_json() {
        let result = AnalysisResult {
            name: "hanlp".to_string(),
            field: "content".to_string(),
            tokens: vec![TokenInfo::from(&Token::with_offsets("你好", 0, 0, 6))],
            duration_ms: 1,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["tokens"][0]["text"], "你好");
        assert_eq!(value["tokens"][0]["end_offset"], 6);
        assert!(value["tokens"][0]["part_of_speech"].is_null());
    }
}
