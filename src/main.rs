use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use subtickets::commands::{
    OutputOptions, RenderOverrides, cmd_check, cmd_config_path, cmd_config_show, cmd_render,
};
use subtickets::config::Config;
use subtickets::types::{AffordanceMode, ColumnKey};

#[derive(Parser)]
#[command(name = "subtickets")]
#[command(about = "Render the subtickets section of a ticket page")]
#[command(version)]
struct Cli {
    /// Configuration file (default: $SUBTICKETS_CONFIG or ./subtickets.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the section for a ticket page as HTML
    Render {
        /// Payload file, or '-' for stdin
        #[arg(short, long)]
        payload: String,

        /// Path of the ticket page, e.g. /trac/ticket/42
        #[arg(long)]
        path: String,

        /// Affordance mode: link or form (overrides the payload)
        #[arg(long, value_parser = parse_mode)]
        mode: Option<AffordanceMode>,

        /// Comma-separated columns: id, summary, status, type, priority, owner
        #[arg(long, value_delimiter = ',', value_parser = parse_column)]
        columns: Option<Vec<ColumnKey>>,

        /// Deepest level to list (0 = direct children only)
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Validate a payload and summarize it
    Check {
        /// Payload file, or '-' for stdin
        payload: String,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Show where configuration is read from
    Path,
}

fn parse_mode(s: &str) -> Result<AffordanceMode, String> {
    s.parse().map_err(|e: subtickets::SubticketsError| e.to_string())
}

fn parse_column(s: &str) -> Result<ColumnKey, String> {
    s.parse().map_err(|e: subtickets::SubticketsError| e.to_string())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    let output = OutputOptions { json: cli.json };
    let config_path = cli.config.unwrap_or_else(Config::config_path);

    let result = Config::load_from(&config_path).and_then(|config| match cli.command {
        Commands::Render {
            payload,
            path,
            mode,
            columns,
            max_depth,
        } => {
            let overrides = RenderOverrides {
                mode,
                columns,
                max_depth,
            };
            cmd_render(&payload, &path, &overrides, &config, output)
        }
        Commands::Check { payload } => cmd_check(&payload, &config, output),
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd_config_show(&config, output),
            ConfigAction::Path => cmd_config_path(&config_path, output),
        },
    });

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
