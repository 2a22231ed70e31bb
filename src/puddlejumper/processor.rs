//! File processing API for puddlejumper documents
//!
//! A processing spec names a stage (what data to extract) and a format (how
//! to render it), written as `stage-format`: `token-simple`, `ast-treeviz`,
//! and so on. [`available_formats`] lists them all.

use std::fs;
use std::path::Path;

use crate::puddlejumper::config::PuddlejumperConfig;
use crate::puddlejumper::error::ParseError;
use crate::puddlejumper::formats::{prioritize, to_pretty_str, to_treeviz_str};
use crate::puddlejumper::lexer::{lex, SpannedToken, Token};
use crate::puddlejumper::parse;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Yaml,
    Treeviz,
    Pretty,
    Priorities,
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "ast-json"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let Some((stage, format)) = format_str.split_once('-') else {
            return Err(ProcessingError::InvalidFormat(format_str.to_string()));
        };

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            "treeviz" => OutputFormat::Treeviz,
            "pretty" => OutputFormat::Pretty,
            "priorities" => OutputFormat::Priorities,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        let spec = ProcessingSpec { stage, format };
        if !Self::available_specs().contains(&spec) {
            return Err(ProcessingError::InvalidFormatType(format!(
                "'{}' is not supported for the {} stage",
                spec.format_name(),
                spec.stage_name()
            )));
        }
        Ok(spec)
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        [
            (ProcessingStage::Token, OutputFormat::Simple),
            (ProcessingStage::Token, OutputFormat::Json),
            (ProcessingStage::Ast, OutputFormat::Treeviz),
            (ProcessingStage::Ast, OutputFormat::Json),
            (ProcessingStage::Ast, OutputFormat::Yaml),
            (ProcessingStage::Ast, OutputFormat::Pretty),
            (ProcessingStage::Ast, OutputFormat::Priorities),
        ]
        .into_iter()
        .map(|(stage, format)| ProcessingSpec { stage, format })
        .collect()
    }

    fn stage_name(&self) -> &'static str {
        match self.stage {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
        }
    }

    fn format_name(&self) -> &'static str {
        match self.format {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Pretty => "pretty",
            OutputFormat::Priorities => "priorities",
        }
    }

    /// The `stage-format` string this spec parses from
    pub fn name(&self) -> String {
        format!("{}-{}", self.stage_name(), self.format_name())
    }
}

/// Errors that can occur during processing
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid stage: {0}")]
    InvalidStage(String),

    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Process source text according to the given specification
pub fn process_str(
    source: &str,
    spec: &ProcessingSpec,
    config: &PuddlejumperConfig,
) -> Result<String, ProcessingError> {
    match spec.stage {
        ProcessingStage::Token => {
            let tokens = lex(source, &config.parser)?;
            format_tokens(&tokens, spec.format)
        }
        ProcessingStage::Ast => {
            let doc = parse(source, &config.parser)?;
            let indent_width = config.formatting.indent_width;
            match spec.format {
                OutputFormat::Treeviz => Ok(to_treeviz_str(&doc)),
                OutputFormat::Pretty => Ok(to_pretty_str(&doc, indent_width)),
                OutputFormat::Priorities => Ok(prioritize(&doc).render(&doc, indent_width)),
                OutputFormat::Json => serde_json::to_string_pretty(&doc)
                    .map_err(|e| ProcessingError::Serialization(e.to_string())),
                OutputFormat::Yaml => serde_yaml::to_string(&doc)
                    .map_err(|e| ProcessingError::Serialization(e.to_string())),
                OutputFormat::Simple => Err(ProcessingError::InvalidFormatType(spec.name())),
            }
        }
    }
}

/// Process a puddlejumper file according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    config: &PuddlejumperConfig,
) -> Result<String, ProcessingError> {
    let content = fs::read_to_string(file_path.as_ref())?;
    process_str(&content, spec, config)
}

/// Format tokens according to the specified format
fn format_tokens(tokens: &[SpannedToken], format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for spanned in tokens {
                result.push_str(&spanned.token.to_string());
                if matches!(spanned.token, Token::Newline | Token::BlankLine) {
                    result.push('\n');
                } else {
                    result.push(' ');
                }
            }
            let mut result = result.trim_end().to_string();
            result.push('\n');
            Ok(result)
        }
        OutputFormat::Json => serde_json::to_string_pretty(tokens)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        _ => Err(ProcessingError::InvalidFormatType(format!(
            "{:?} is not a token format",
            format
        ))),
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::name)
        .collect()
}
