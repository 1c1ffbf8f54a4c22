//! docpath command-line interface.
//!
//! Reads documents from JSON, YAML or TOML files, applies path operations
//! from the library, and prints or writes back the result.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use docpath::{
    compute_diff, delete_path, format_diff, merge_root, parse_file, parse_value_arg, resolve,
    serialize_node, set_path, DocumentFormat, FormatHint, Node, OutputFormat, OutputOptions,
    PathExpr, PathPolicy,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// docpath - navigate, patch and compare document trees by path
///
/// Paths are slash-delimited keys such as `settings/theme/color`.
#[derive(Parser)]
#[command(name = "docpath")]
#[command(version)]
#[command(about = "Navigate, patch and compare document trees by path", long_about = None)]
struct Cli {
    /// Reject empty paths ("" or "/") instead of addressing the key ""
    #[arg(long, global = true)]
    strict_paths: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the node at PATH
    Get {
        /// Document file ("-" for stdin)
        file: PathBuf,
        /// Slash-delimited path
        path: String,
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        output: DocFormatArg,
    },
    /// Set the value at PATH, creating intermediate objects
    Set {
        file: PathBuf,
        path: String,
        /// JSON value; anything that is not valid JSON is taken as a string
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[command(flatten)]
        emit: EmitArgs,
    },
    /// Delete the key at PATH
    Delete {
        file: PathBuf,
        path: String,
        #[command(flatten)]
        emit: EmitArgs,
    },
    /// Shallow-merge the top-level keys of PAYLOAD into the document root
    Merge {
        file: PathBuf,
        payload: PathBuf,
        #[command(flatten)]
        emit: EmitArgs,
    },
    /// Compare two documents (exit 0 if equal, 1 if different)
    Diff {
        #[arg(value_name = "FILE1")]
        file1: PathBuf,
        #[arg(value_name = "FILE2")]
        file2: PathBuf,
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "terminal")]
        format: OutputFormatArg,
        /// Show full values instead of previews
        #[arg(long)]
        show_values: bool,
        /// Maximum length for displayed values
        #[arg(long, default_value = "80")]
        max_value_length: usize,
        /// Quiet mode (only show changes, suppress summary)
        #[arg(short, long)]
        quiet: bool,
    },
}

#[derive(Args)]
struct EmitArgs {
    /// Write the result back to FILE in its own format
    #[arg(short, long)]
    write: bool,
    /// Print in this format instead of the input's
    #[arg(short, long, value_enum)]
    output: Option<DocFormatArg>,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Colored terminal output
    Terminal,
    /// JSON object with added, removed and changed
    Json,
    /// Plain text (no colors)
    Plain,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Plain => OutputFormat::Plain,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum DocFormatArg {
    Json,
    Yaml,
    Toml,
}

impl From<DocFormatArg> for DocumentFormat {
    fn from(arg: DocFormatArg) -> Self {
        match arg {
            DocFormatArg::Json => DocumentFormat::Json,
            DocFormatArg::Yaml => DocumentFormat::Yaml,
            DocFormatArg::Toml => DocumentFormat::Toml,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    let policy = if cli.strict_paths {
        PathPolicy::Strict
    } else {
        PathPolicy::Lenient
    };

    match cli.command {
        Command::Get { file, path, output } => {
            let doc = load(&file)?;
            let path = PathExpr::parse_with(&path, policy)?;
            let node = resolve(&doc, &path)?;
            println!("{}", serialize_node(node, output.into())?.trim_end());
            Ok(0)
        }
        Command::Set {
            file,
            path,
            value,
            emit,
        } => {
            let doc = load(&file)?;
            let path = PathExpr::parse_with(&path, policy)?;
            let updated = set_path(&doc, &path, parse_value_arg(&value));
            debug!(%path, "value set");
            emit_document(&updated, &file, &emit)?;
            Ok(0)
        }
        Command::Delete { file, path, emit } => {
            let doc = load(&file)?;
            let path = PathExpr::parse_with(&path, policy)?;
            let updated = delete_path(&doc, &path)?;
            debug!(%path, "key deleted");
            emit_document(&updated, &file, &emit)?;
            Ok(0)
        }
        Command::Merge {
            file,
            payload,
            emit,
        } => {
            let doc = load(&file)?;
            let payload_node = load(&payload)?;
            let merged = match payload_node.as_object() {
                Some(map) if !map.is_empty() => {
                    debug!(keys = map.len(), "merging payload");
                    merge_root(&doc, map)
                }
                Some(_) => doc,
                None => {
                    warn!(
                        found = payload_node.type_name(),
                        "payload is not an object, document left unchanged"
                    );
                    doc
                }
            };
            emit_document(&merged, &file, &emit)?;
            Ok(0)
        }
        Command::Diff {
            file1,
            file2,
            format,
            show_values,
            max_value_length,
            quiet,
        } => {
            let old = load(&file1)?;
            let new = load(&file2)?;
            let diff = compute_diff(&old, &new)?;
            debug!(changes = diff.len(), "diff computed");

            let options = OutputOptions {
                show_values,
                max_value_length,
            };
            let output = format_diff(&diff, &format.into(), &options)
                .context("Failed to format diff output")?;

            if quiet {
                for line in output.lines() {
                    if !line.starts_with("Summary:") && !line.trim().is_empty() {
                        println!("{}", line);
                    }
                }
            } else {
                println!("{}", output);
            }

            Ok(if diff.is_empty() { 0 } else { 1 })
        }
    }
}

fn load(file: &Path) -> Result<Node> {
    debug!(file = %file.display(), "parsing");
    parse_file(file).with_context(|| format!("Failed to parse {}", file.display()))
}

fn emit_document(node: &Node, file: &Path, args: &EmitArgs) -> Result<()> {
    let input_format = DocumentFormat::from_hint(FormatHint::from_path(file));

    if args.write {
        if file.as_os_str() == "-" {
            bail!("--write needs a file, not stdin");
        }
        let mut text = serialize_node(node, input_format)?;
        if !text.ends_with('\n') {
            text.push('\n');
        }
        fs::write(file, text).with_context(|| format!("Failed to write {}", file.display()))?;
        info!(file = %file.display(), "document written");
        return Ok(());
    }

    let format = args.output.map(DocumentFormat::from).unwrap_or(input_format);
    println!("{}", serialize_node(node, format)?.trim_end());
    Ok(())
}
