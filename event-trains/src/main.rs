use std::error::Error;
use std::io::{BufRead, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use event_trains::config::AppConfig;
use event_trains::events_api::{EventsClient, FileCredentialStore};
use event_trains::live_station::LiveStationClient;
use event_trains::matching::{compute_matches, render_table, wait_from_minutes};
use event_trains::web::{AppState, MatchedTrainsResponse, create_router};

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "event-trains", version, about = "Match arriving trains to upcoming events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to bind (overrides EVENT_TRAINS_BIND)
        #[arg(long)]
        bind: Option<SocketAddr>,
        /// Static asset directory (overrides EVENT_TRAINS_STATIC_DIR)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Request a login OTP
    SendOtp {
        #[arg(long)]
        phone: String,
    },
    /// Log in with an OTP and store the credential
    Login {
        #[arg(long)]
        phone: String,
        /// OTP received by text; prompted for if omitted
        #[arg(long)]
        otp: Option<String>,
    },
    /// Run one matching cycle and print the result
    Matches {
        /// Maximum wait between arrival and event start, in minutes
        #[arg(long, allow_negative_numbers = true)]
        wait: i64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("event_trains=info")),
        )
        .init();

    let cli = Cli::parse();
    let result = match AppConfig::from_env() {
        Ok(config) => run(cli.command, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: AppConfig) -> CliResult {
    match command {
        Commands::Serve { bind, static_dir } => {
            let bind = bind.unwrap_or(config.bind);
            let static_dir = static_dir.unwrap_or_else(|| config.static_dir.clone());
            serve(config, bind, static_dir).await
        }
        Commands::SendOtp { phone } => {
            let response = events_client(&config)?.send_otp(&phone).await?;
            println!("OTP sent: {response}");
            Ok(())
        }
        Commands::Login { phone, otp } => {
            let otp = match otp {
                Some(otp) => otp,
                None => prompt("OTP: ")?,
            };
            events_client(&config)?.verify_otp(&phone, &otp).await?;
            println!(
                "Logged in; credential saved to {}",
                config.credentials_path.display()
            );
            Ok(())
        }
        Commands::Matches { wait, json } => {
            let wait = wait_from_minutes(wait).ok_or("wait is out of range")?;
            let trains = LiveStationClient::new(config.live_station.clone())?;
            let events = events_client(&config)?;

            let matched_trains = compute_matches(&trains, &events, &config.matching, wait).await?;

            if json {
                let body = MatchedTrainsResponse { matched_trains };
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print!("{}", render_table(&matched_trains));
            }
            Ok(())
        }
    }
}

async fn serve(config: AppConfig, bind: SocketAddr, static_dir: PathBuf) -> CliResult {
    let trains = LiveStationClient::new(config.live_station.clone())?;
    let events = events_client(&config)?;

    if !events.is_logged_in()? {
        info!("no stored credential; log in via POST /login or the login command");
    }

    let stations: Vec<&str> = config.matching.stations.iter().map(|s| s.as_str()).collect();
    let state = AppState::new(trains, events, config.matching.clone());
    let app = create_router(state, &static_dir);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(
        %bind,
        static_dir = %static_dir.display(),
        stations = %stations.join(","),
        "event-trains listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn events_client(config: &AppConfig) -> Result<EventsClient, Box<dyn Error>> {
    let store = FileCredentialStore::new(&config.credentials_path);
    Ok(EventsClient::new(config.events.clone(), Arc::new(store))?)
}

fn prompt(label: &str) -> Result<String, Box<dyn Error>> {
    print!("{label}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
