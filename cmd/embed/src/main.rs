//! embed - turn text into vectors with an OpenAI-compatible embeddings API.

use std::io::{self, BufRead};

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ragbox_embed::{EmbedConfig, EmbedEnv, Embedder, OpenAI, select_config};

mod output;

use output::{Output, OutputFormat};

/// embed - turn text into vectors.
///
/// The endpoint is picked from the environment: with OPENAI_API_BASE set,
/// requests go to that OpenAI-compatible server using OPENAI_API_KEY;
/// otherwise the hosted OpenAI API is used.
///
/// Texts come from the arguments, or one per line on stdin when none are
/// given.
#[derive(Parser, Debug)]
#[command(name = "embed")]
#[command(about = "Embed text with an OpenAI-compatible API")]
#[command(version)]
pub struct Cli {
    /// Texts to embed (default: read lines from stdin)
    pub texts: Vec<String>,

    /// Embedding model
    #[arg(long)]
    pub model: Option<String>,

    /// Output dimension (models that support shortening only)
    #[arg(long)]
    pub dimension: Option<usize>,

    /// Texts per API request
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Output as JSON (default: YAML)
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Selector defaults for `env`, with command-line overrides applied.
    fn embed_config(&self, env: &EmbedEnv) -> EmbedConfig {
        let mut cfg = select_config(env);
        if let Some(model) = &self.model {
            cfg = cfg.with_model(model);
        }
        if let Some(dim) = self.dimension {
            cfg = cfg.with_dimension(dim);
        }
        if let Some(size) = self.chunk_size {
            cfg = cfg.with_chunk_size(size);
        }
        cfg
    }

    /// Client for `env`; `env` also supplies the fallback base URL and key.
    fn client(&self, env: &EmbedEnv) -> OpenAI {
        OpenAI::with_env(self.embed_config(env), env)
    }

    fn output(&self) -> Output {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Yaml
        };
        Output::new(format, self.output.clone())
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRecord<'a> {
    index: usize,
    text: &'a str,
    dimension: usize,
    embedding: Vec<f32>,
}

/// Non-empty, trimmed lines of `reader`.
fn read_lines(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut texts = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            texts.push(line.to_string());
        }
    }
    Ok(texts)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let texts = if cli.texts.is_empty() {
        read_lines(io::stdin().lock()).context("read stdin")?
    } else {
        cli.texts.clone()
    };
    if texts.is_empty() {
        anyhow::bail!("no input text: pass texts as arguments or on stdin");
    }

    let env = EmbedEnv::from_env();
    let client = cli.client(&env);
    info!(
        model = client.model(),
        base_url = %client.resolved_base_url(),
        count = texts.len(),
        "embedding"
    );

    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let vectors = client
        .embed_batch(&refs)
        .await
        .context("embedding request failed")?;

    let records: Vec<EmbeddingRecord<'_>> = texts
        .iter()
        .zip(vectors)
        .enumerate()
        .map(|(index, (text, embedding))| EmbeddingRecord {
            index,
            text: text.as_str(),
            dimension: embedding.len(),
            embedding,
        })
        .collect();

    cli.output().write(&records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_texts_and_flags() {
        let cli = Cli::try_parse_from([
            "embed",
            "--model",
            "bge-m3",
            "--chunk-size",
            "8",
            "--json",
            "hello",
            "world",
        ])
        .unwrap();
        assert_eq!(cli.texts, vec!["hello", "world"]);
        assert_eq!(cli.model.as_deref(), Some("bge-m3"));
        assert_eq!(cli.chunk_size, Some(8));
        assert!(cli.json);
        assert!(!cli.verbose);
    }

    #[test]
    fn overrides_apply_on_top_of_selection() {
        let cli = Cli::try_parse_from(["embed", "--dimension", "512", "x"]).unwrap();
        let env = EmbedEnv::default()
            .with_api_base("https://example.com/v1")
            .with_api_key("sk-x");
        let cfg = cli.embed_config(&env);
        assert_eq!(cfg.model, "text-embedding-3-small");
        assert_eq!(cfg.chunk_size, 200);
        assert_eq!(cfg.dimension, 512);
        assert_eq!(cfg.base_url.as_deref(), Some("https://example.com/v1"));
        assert_eq!(cfg.api_key.as_deref(), Some("sk-x"));
    }

    #[test]
    fn no_overrides_keeps_selection() {
        let cli = Cli::try_parse_from(["embed"]).unwrap();
        assert_eq!(cli.embed_config(&EmbedEnv::default()), select_config(&EmbedEnv::default()));
        assert_eq!(cli.output().format, OutputFormat::Yaml);
    }

    #[test]
    fn client_uses_snapshot_only() {
        let cli = Cli::try_parse_from(["embed", "--model", "bge-m3", "x"]).unwrap();
        let env = EmbedEnv::default().with_api_base("http://localhost:8080/v1");
        let client = cli.client(&env);
        assert_eq!(client.model(), "bge-m3");
        assert_eq!(client.resolved_base_url(), "http://localhost:8080/v1");
        assert_eq!(client.resolved_api_key(), None);
    }

    #[test]
    fn stdin_lines_skip_blanks() {
        let input = b"first\n\n  second  \n\t\nthird" as &[u8];
        let texts = read_lines(input).unwrap();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }
}
