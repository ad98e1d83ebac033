use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use netcfg_convert::dialect::Dialect;
use netcfg_core::IndexStyle;

#[derive(Parser, Debug)]
#[command(name = "netcfg-convert")]
#[command(about = "Translate Cisco and Huawei device configurations")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Convert one configuration into another dialect.
    Convert(ConvertArgs),
    /// Show the parsed model of one configuration.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Source configuration file.
    pub input: PathBuf,
    /// Output file path.
    #[arg(short, long)]
    pub output: PathBuf,
    /// Source dialect: cisco, huawei or json.
    #[arg(long, default_value = "cisco")]
    pub from: Dialect,
    /// Destination dialect: cisco, huawei or json.
    #[arg(long, default_value = "huawei")]
    pub to: Dialect,
    /// Interface type mappings, e.g. `FastEthernet=GigabitEthernet,Ethernet=10GE`.
    #[arg(long = "if-map")]
    pub if_map: Option<String>,
    /// Interface index style: keep, 2 or 3. Overrides the profile.
    #[arg(long = "if-index")]
    pub if_index: Option<IndexStyle>,
    /// Leading segment inserted by index style 3. Overrides the profile.
    #[arg(long = "if-index-prefix")]
    pub if_index_prefix: Option<String>,
    /// TOML rename profile with mappings and index options.
    #[arg(long)]
    pub profile: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Configuration file to inspect.
    pub input: PathBuf,
    /// Source dialect: cisco, huawei or json.
    #[arg(long, default_value = "cisco")]
    pub from: Dialect,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
