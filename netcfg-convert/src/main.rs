use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use netcfg_convert::conversion_summary::{render, summarize};
use netcfg_convert::inspect::render_outline;
use netcfg_core::to_json;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;
mod convert;
mod path_guard;

use cli::{Cli, Command, InspectArgs, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Convert(args) => convert::run_convert(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn init_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install log subscriber")?;
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let cfg = args
        .from
        .parse(&text)
        .with_context(|| format!("failed to parse {} as {}", args.input.display(), args.from))?;

    match args.format {
        OutputFormat::Text => {
            print!("{}", render_outline(&cfg));
            println!("{}", render(summarize(&cfg)));
        }
        OutputFormat::Json => println!("{}", to_json(&cfg)?),
    }
    Ok(())
}
