mod cmd;
mod output;

use clap::{Parser, Subcommand};
use issuechat_core::Config;

#[derive(Parser)]
#[command(
    name = "issuechat",
    about = "Chat assistant that turns conversations into GitHub issues",
    version,
    propagate_version = true
)]
struct Cli {
    /// GitHub token used for both the Models inference endpoint and the
    /// issues API
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Model identifier on the inference endpoint
    #[arg(long, global = true, env = "ISSUECHAT_MODEL", default_value = github_client::DEFAULT_MODEL)]
    model: String,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive chat session
    Chat,

    /// Analyze a single message and print the issue verdict
    Analyze {
        /// The message to analyze
        message: String,
    },

    /// Launch the web UI
    Ui {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, env = "PORT", default_value = "3000")]
        port: u16,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Ui { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let result = (|| {
        let token = cli.token.ok_or_else(|| {
            anyhow::anyhow!("no GitHub token: pass --token or set GITHUB_TOKEN")
        })?;
        let config = Config::new(token).with_model(cli.model);

        match cli.command {
            Commands::Chat => cmd::chat::run(config),
            Commands::Analyze { message } => cmd::analyze::run(config, &message, cli.json),
            Commands::Ui { port, no_open } => cmd::ui::run(config, port, no_open),
        }
    })();

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
