use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};
use perceiver_semantic::{Classification, ClassificationBasis, LexiconClassifier};
use tokio::fs;

use crate::cli::output::{emit, OutputFormat};

#[derive(Args, Clone, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["text", "file"])))]
pub struct ClassifyArgs {
    /// Description text
    #[arg(long)]
    pub text: Option<String>,

    /// File holding the description text
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

pub async fn cmd_classify(args: ClassifyArgs, output: OutputFormat) -> Result<()> {
    let text = match (args.text, args.file) {
        (Some(text), _) => text,
        (None, Some(file)) => fs::read_to_string(&file)
            .await
            .with_context(|| format!("Failed to read {}", file.display()))?,
        (None, None) => String::new(),
    };

    let classification = LexiconClassifier::new().classify(&text);
    emit(output, &classification, describe)
}

fn describe(classification: &Classification) -> String {
    let basis = match &classification.basis {
        ClassificationBasis::Scored { spanish, english } => {
            format!("scored spanish={} english={}", spanish, english)
        }
        ClassificationBasis::Tie { score } => format!("tie at {}", score),
        ClassificationBasis::Fallback { reason } => format!("fallback: {}", reason),
    };
    format!("{} ({})", classification.language, basis)
}
