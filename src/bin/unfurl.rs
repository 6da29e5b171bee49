use std::{
    fs::File,
    io::{BufReader, Read as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "unfurl", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay an input trace against an in-memory page and print the report as JSON.
    Simulate(SimulateArgs),
    /// Print the default configuration as JSON.
    Defaults,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input trace JSON.
    #[arg(long)]
    trace: PathBuf,

    /// Controller configuration JSON; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the report.
    #[arg(long)]
    pretty: bool,

    /// Write the report here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Defaults => cmd_defaults(),
    }
}

fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let mut text = String::new();
    BufReader::new(f)
        .read_to_string(&mut text)
        .with_context(|| format!("read {what} '{}'", path.display()))?;
    Ok(text)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => unfurl::RevealConfig::from_json_str(&read_text(path, "config")?)
            .with_context(|| format!("parse config '{}'", path.display()))?,
        None => unfurl::RevealConfig::default(),
    };
    let trace = unfurl::parse_trace(&read_text(&args.trace, "trace")?)
        .with_context(|| format!("parse trace '{}'", args.trace.display()))?;

    let report = unfurl::simulate(&config, &trace)?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .with_context(|| "serialize report")?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_defaults() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&unfurl::RevealConfig::default())
        .with_context(|| "serialize default config")?;
    println!("{json}");
    Ok(())
}
