use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use pog_core::{ProcessOpts, Processor, TypeSchema};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pog",
    about = "Replace enum codes in serialized game JSON with their names",
    version
)]
struct Cli {
    /// Type schema JSON ({"classes": {...}})
    types_json: PathBuf,
    /// Document to process, or a directory of .json documents
    input: PathBuf,
    /// Prefix names with their enum type, e.g. DamageType::Fire
    #[arg(long, default_value_t = false)]
    show_enum_stubs: bool,
    /// JSON Pointer to the part of the document to process, e.g. /inventory
    #[arg(long, default_value = "")]
    at: String,
    /// Only rewrite the target object(s), not their nested children
    #[arg(long, default_value_t = false)]
    no_recurse: bool,
    /// Optional output .json path to write; otherwise prints to stdout
    #[arg(long)]
    out: Option<PathBuf>,
    /// Exit with status 4 when processing stopped on an error (any file, for directories)
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = ProcessOpts {
        show_enum_stubs: cli.show_enum_stubs,
    };
    let processor = load_processor(&cli.types_json, opts).unwrap_or_else(|e| {
        eprintln!("error: {:#}", e);
        std::process::exit(2);
    });
    let descent = pog_core::pointer_segments(&cli.at);
    let recurse_into = !cli.no_recurse;

    let (result, failed) = if cli.input.is_dir() {
        let batch = pog_core::process_dir(
            &processor,
            &cli.input,
            &descent,
            recurse_into,
            Some(cli.types_json.as_path()),
        )
        .unwrap_or_else(|e| {
            eprintln!("error: {}", e);
            std::process::exit(2);
        });
        let failed = !batch.failed_files.is_empty();
        (batch.document, failed)
    } else {
        let outcome = pog_core::process_file(&processor, &cli.input, &descent, recurse_into)
            .unwrap_or_else(|e| {
                eprintln!("error: {}", e);
                std::process::exit(2);
            });
        match outcome.into_result() {
            Ok(document) => (document, false),
            Err((document, _)) => (document, true),
        }
    };

    if let Err(e) = emit(&result, cli.out.as_deref()) {
        eprintln!("error writing: {:#}", e);
        std::process::exit(3);
    }
    if failed && cli.strict {
        std::process::exit(4);
    }
}

fn load_processor(types_json: &Path, opts: ProcessOpts) -> anyhow::Result<Processor> {
    let schema = TypeSchema::from_path(types_json)
        .with_context(|| format!("loading type schema {}", types_json.display()))?;
    tracing::debug!(path = %types_json.display(), "loaded type schema");
    Ok(Processor::new(schema, opts))
}

fn emit(value: &serde_json::Value, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => pog_core::write_json_to_file(path, value)?,
        None => println!(
            "{}",
            serde_json::to_string_pretty(value).context("serializing result")?
        ),
    }
    Ok(())
}
