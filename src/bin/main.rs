//! JSON-LD Thing Flattening CLI
//!
//! Command-line tool for flattening JSON-LD documents into things and
//! inspecting their Hydra operations.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jsonld_things::{
    load_document, parse_document, to_json_string, FlattenError, OutputOptions, ParsedDocument,
};

#[derive(Parser)]
#[command(name = "jsonld-things")]
#[command(about = "Flatten JSON-LD documents into things, relations and operations")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten a document into its root thing and embedded things
    Flatten(FlattenArgs),
    /// Print the operations of a document's root thing
    Operations(OperationsArgs),
}

#[derive(Args)]
struct FlattenArgs {
    /// Path to a JSON-LD document, or "-" for stdin
    source: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Only print ids referenced but never embedded
    #[arg(long)]
    unresolved_only: bool,
}

#[derive(Args)]
struct OperationsArgs {
    /// Path to a JSON-LD document, or "-" for stdin
    source: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Load a document from a path or stdin
fn load(source: &str) -> Result<ParsedDocument, FlattenError> {
    if source == "-" {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        parse_document(&content, "<stdin>")
    } else {
        load_document(Path::new(source))
    }
}

/// Write output to file or stdout
fn write_output(content: &str, output: Option<&PathBuf>) -> Result<(), FlattenError> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

fn run_flatten(args: FlattenArgs) -> Result<(), FlattenError> {
    let doc = load(&args.source)?;
    let options = OutputOptions {
        pretty: args.pretty,
    };

    let output = if args.unresolved_only {
        to_json_string(&doc.unresolved_ids(), &options)?
    } else {
        to_json_string(&doc.to_json(), &options)?
    };

    eprintln!(
        "Flattened {} things ({} unresolved)",
        doc.things.len(),
        doc.unresolved_ids().len()
    );

    write_output(&output, args.output.as_ref())
}

fn run_operations(args: OperationsArgs) -> Result<(), FlattenError> {
    let doc = load(&args.source)?;
    let options = OutputOptions {
        pretty: args.pretty,
    };

    let output = to_json_string(doc.operations(), &options)?;
    write_output(&output, args.output.as_ref())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Flatten(args) => run_flatten(args),
        Commands::Operations(args) => run_operations(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
