mod alert;
mod client;
mod commands;
mod config;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::{AlertgenConfig, EndpointConfig, Session};
use error::AlertgenError;

#[derive(Parser)]
#[command(
    name = "alertgen",
    version,
    about = "Convert natural language into alert configurations"
)]
struct Cli {
    /// Base URL of the API server
    #[arg(long, env = "ALERT_API_HOST", global = true)]
    host: Option<String>,

    /// Endpoint path for alert configuration
    #[arg(long, env = "ALERT_API_PATH", global = true)]
    path: Option<String>,

    /// Send requests to this URL instead of host + path
    #[arg(long, global = true)]
    url: Option<String>,

    /// Output format for the configuration: json, yaml, table
    #[arg(short, long, env = "ALERTGEN_OUTPUT", global = true)]
    output: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive form (the default)
    #[command(alias = "i")]
    Interactive,
    /// Generate one alert configuration and exit
    #[command(alias = "gen")]
    Generate {
        /// Natural-language alert description
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Check that the API host answers
    #[command(alias = "ping")]
    TestConnection,
    /// Show example messages
    Examples,
    /// Show the effective endpoint configuration
    Config,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ALERTGEN_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = AlertgenConfig::load();

    let defaults = EndpointConfig::default();
    let endpoint = EndpointConfig::new(
        cli.host.or(cfg.host).unwrap_or(defaults.host),
        cli.path.or(cfg.path).unwrap_or(defaults.path),
    );
    let output_format = cli.output.or(cfg.output).unwrap_or_else(|| "json".into());
    let url_override = cli.url.as_deref();

    let mut session = Session::new(config::endpoint_override()).with_endpoint(endpoint);
    let client = client::AlertClient::new();

    let result = match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            commands::interactive::run(stdin, &client, &mut session, url_override, &output_format)
                .await
        }
        Commands::Generate { message } => {
            commands::generate::run(
                &message.join(" "),
                url_override,
                &client,
                &mut session,
                &output_format,
            )
            .await
        }
        Commands::TestConnection => {
            if commands::health::run(&client, &mut session).await {
                Ok(())
            } else {
                std::process::exit(1);
            }
        }
        Commands::Examples => {
            commands::print_examples();
            Ok(())
        }
        Commands::Config => commands::config_cmd::run(&mut session, &output_format),
        Commands::Version => {
            println!("alertgen {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(e) = result {
        match e {
            AlertgenError::EmptyInput => output::print_warning(&e.to_string()),
            _ => output::print_error(&e.to_string()),
        }
        std::process::exit(1);
    }
}
