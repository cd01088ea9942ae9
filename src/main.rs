mod config;
mod generate;
mod prompt;

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::generate::Generate;

#[derive(Parser)]
#[command(version)]
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
#[command(about = "Scaffold a web components project")]
struct Cli {
    #[command(flatten)]
    generate: Generate,

    #[arg(
        short = 'h',
        long = "help",
        help = "Print this help message.",
        action = ArgAction::Help,
    )]
    help: Option<bool>,

    #[arg(
        short = 'V',
        long = "version",
        help = "Print version information.",
        action = ArgAction::Version,
    )]
    version: Option<bool>,
}

pub(crate) struct App {
    cli: Cli,
    config: Config,
}

impl App {
    fn init() -> Result<Self> {
        let cli = Cli::parse();
        let config = Config::init()?;
        Ok(Self { cli, config })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    App::init()?.generate()
}
