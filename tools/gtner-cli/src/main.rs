//! gtner command-line driver
//!
//! Replays the conversion handlers against a local directory laid out like a
//! bucket (`<root>/<bucket>/<key>`), and exposes the `.iob` file utilities.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use gtner_core::{
    ConverterConfig, DEFAULT_ATTR, LabelCollector, LogFormat, bilou_to_bio_line, init_tracing, split,
    write_split,
};
use gtner_lambda::{ComprehendHandler, ConllHandler, InvocationContext, S3Event};
use gtner_store::{LocalStore, S3Uri};

/// CLI arguments
#[derive(Parser)]
#[command(name = "gtner")]
#[command(about = "Convert Ground Truth NER manifests to training data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a manifest to CoNLL-2003 tagged tokens
    Conll {
        #[command(flatten)]
        object: ObjectArgs,

        /// Tagging scheme: bilou or bio, in any case or letter order
        #[arg(short, long, env = "GTNER_CODEC", default_value = "bilou")]
        codec: String,

        /// Emit a -DOCSTART- marker before each document
        #[arg(long)]
        doc_sep: bool,

        /// Labeling attribute holding the annotations
        #[arg(short, long, env = "GTNER_ATTR", default_value = DEFAULT_ATTR)]
        attr: String,
    },
    /// Export a manifest as a Comprehend documents file and annotations CSV
    Comprehend {
        #[command(flatten)]
        object: ObjectArgs,
    },
    /// Split tagged tokens into train and test files, 2:1 by sentence
    Split {
        /// Tagged-token file (stdin if omitted)
        input: Option<PathBuf>,

        /// Train output file
        #[arg(long)]
        train: PathBuf,

        /// Test output file
        #[arg(long)]
        test: PathBuf,
    },
    /// Rewrite BILOU tags as BIO
    Bio {
        /// Tagged-token file (stdin if omitted)
        input: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the sorted set of tags, one per line
    Labels {
        /// Tagged-token files (stdin if none)
        inputs: Vec<PathBuf>,

        /// Output file, e.g. label.txt (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct ObjectArgs {
    /// Manifest location, s3://bucket/key
    uri: S3Uri,

    /// Local directory standing in for S3
    #[arg(short, long, env = "GTNER_STORE_ROOT", default_value = ".")]
    root: PathBuf,
}

impl ObjectArgs {
    fn event(&self) -> S3Event {
        S3Event::for_object(self.uri.bucket.clone(), self.uri.key.clone())
    }
}

fn local_context() -> InvocationContext {
    InvocationContext::new(format!("local-{}", std::process::id()), "local", "gtner-cli")
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    })
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    })
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
    ))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(LogFormat::TERMINAL).context("failed to install tracing subscriber")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Conll {
            object,
            codec,
            doc_sep,
            attr,
        } => {
            let config = ConverterConfig::new()
                .with_codec(codec)
                .with_doc_sep(doc_sep)
                .with_attr(attr);
            let handler = ConllHandler::new(LocalStore::new(&object.root), config)?;
            let response = handler
                .handle(&object.event(), &local_context())
                .await
                .with_context(|| format!("failed to convert {}", object.uri))?;
            print_json(&response)?;
        }
        Commands::Comprehend { object } => {
            let handler = ComprehendHandler::new(LocalStore::new(&object.root));
            let response = handler
                .handle(&object.event(), &local_context())
                .await
                .with_context(|| format!("failed to export {}", object.uri))?;
            print_json(&response)?;
        }
        Commands::Split { input, train, test } => {
            let reader = open_input(input.as_deref())?;
            let lines = reader.lines().collect::<io::Result<Vec<_>>>()?;
            let (n_train, n_test) =
                write_split(split(lines), &mut create(&train)?, &mut create(&test)?)?;
            info!(train = n_train, test = n_test, "split sentences");
        }
        Commands::Bio { input, output } => {
            let reader = open_input(input.as_deref())?;
            let mut writer = open_output(output.as_deref())?;
            for line in reader.lines() {
                writeln!(writer, "{}", bilou_to_bio_line(&line?))?;
            }
            writer.flush()?;
        }
        Commands::Labels { inputs, output } => {
            let mut collector = LabelCollector::new();
            if inputs.is_empty() {
                for line in open_input(None)?.lines() {
                    collector.observe(&line?);
                }
            }
            for path in &inputs {
                for line in open_input(Some(path))?.lines() {
                    collector.observe(&line?);
                }
            }
            let mut writer = open_output(output.as_deref())?;
            let labels = collector.sorted_labels();
            for label in &labels {
                writeln!(writer, "{label}")?;
            }
            writer.flush()?;
            info!(labels = labels.len(), "collected labels");
        }
    }

    Ok(())
}
