//! Dirscope - read-only directory queries
//!
//! Runs subtree searches against an LDAP directory and prints the matching
//! person entries.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use commands::CommandContext;
use dirscope_core::config::DirscopeConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "dirscope")]
#[command(author = "Dirscope Team")]
#[command(version = dirscope_core::VERSION)]
#[command(about = "Read-only directory queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// LDAP server URL
    #[arg(long, global = true, env = "DIRSCOPE_LDAP_URL")]
    url: Option<String>,

    /// Bind DN of the system account
    #[arg(long, global = true, env = "DIRSCOPE_BIND_DN")]
    bind_dn: Option<String>,

    /// Bind password of the system account
    #[arg(long, global = true, env = "DIRSCOPE_BIND_PASSWORD", hide_env_values = true)]
    bind_password: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "DIRSCOPE_LOG_LEVEL")]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a subtree search and print matching users
    Query {
        /// Search base DN (defaults to ldap.base_dn)
        #[arg(short, long)]
        base: Option<String>,

        /// Search filter (defaults to ldap.default_filter)
        #[arg(long)]
        filter: Option<String>,

        /// Fail unless exactly one entry matches
        #[arg(long)]
        single: bool,
    },

    /// Print the effective configuration
    Config,

    /// Show version information
    Version,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Load or create config
    let mut config = if let Some(config_path) = &cli.config {
        DirscopeConfig::from_file(config_path)?
    } else {
        DirscopeConfig::from_env()
    };

    // Override with CLI args
    if let Some(url) = cli.url {
        config.ldap.server_url = url;
    }
    if let Some(bind_dn) = cli.bind_dn {
        config.ldap.bind_dn = bind_dn;
    }
    if let Some(password) = cli.bind_password {
        config.ldap.bind_password = password;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config);

    let ctx = CommandContext {
        config,
        output_format: cli.format,
    };

    match cli.command {
        Commands::Query { base, filter, single } => {
            commands::query::execute(&ctx, base.as_deref(), filter.as_deref(), single).await
        }
        Commands::Config => commands::config::execute(&ctx),
        Commands::Version => {
            println!("dirscope {}", dirscope_core::VERSION);
            Ok(())
        }
    }
}

fn init_logging(config: &DirscopeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    // Logs go to stderr so query output stays parseable
    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
}
