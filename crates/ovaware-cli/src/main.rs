use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use eyre::Result;
use ovaware_assessment::ValidationScope;
use ovaware_cli::config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "ovaware", version, about = "Ovarian cancer risk questionnaire")]
struct Cli {
    /// Config file (defaults to the platform config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill in the questionnaire from an answers file and score it.
    Assess {
        #[arg(long)]
        answers: PathBuf,
        /// Which fields each step checks before moving on.
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,
    },
    /// List past assessments.
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        clear: bool,
    },
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    Show,
    Init {
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ScopeArg {
    Section,
    Record,
}

impl From<ScopeArg> for ValidationScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Section => ValidationScope::CurrentSection,
            ScopeArg::Record => ValidationScope::WholeRecord,
        }
    }
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config_path = config::resolve_path(cli.config.as_deref())?;

    match cli.command {
        Command::Assess { answers, scope } => {
            let config = config::load_config(&config_path)?;
            commands::assess(&config, &answers, scope.map(Into::into)).await
        }
        Command::History { limit, clear } => {
            let config = config::load_config(&config_path)?;
            commands::history(&config, limit, clear)
        }
        Command::Config { action } => match action {
            ConfigAction::Show => commands::config_show(&config_path),
            ConfigAction::Init { force } => commands::config_init(&config_path, force),
        },
    }
}
