use std::path::PathBuf;
use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{Map, Value};

#[derive(Parser)]
#[command(name = "tablet-cli")]
#[command(about = "Management CLI for the tablet discovery service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:15000")]
    url: String,

    /// Admin API key, if the service requires one.
    #[arg(short, long)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service status and active algorithm
    Status,
    /// Show current replication lag settings
    Env,
    /// Change replication lag settings; unset flags are left alone
    Set {
        #[arg(long)]
        low_lag_secs: Option<u64>,
        #[arg(long)]
        high_lag_secs: Option<u64>,
        #[arg(long)]
        min_tablets: Option<usize>,
        #[arg(long)]
        legacy: Option<bool>,
    },
    /// Filter a JSON file of tablet health records
    Filter {
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(key) = &cli.key {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", key))?);
    }

    let res = match cli.command {
        Commands::Status => {
            client.get(format!("{}/admin/status", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Env => {
            client.get(format!("{}/debug/env", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Set { low_lag_secs, high_lag_secs, min_tablets, legacy } => {
            let mut body = Map::new();
            if let Some(v) = low_lag_secs {
                body.insert("low_replication_lag_secs".into(), v.into());
            }
            if let Some(v) = high_lag_secs {
                body.insert("high_replication_lag_minimum_serving_secs".into(), v.into());
            }
            if let Some(v) = min_tablets {
                body.insert("min_number_serving_tablets".into(), v.into());
            }
            if let Some(v) = legacy {
                body.insert("legacy_replication_lag_algorithm".into(), v.into());
            }
            client.post(format!("{}/debug/env", cli.url))
                .headers(headers)
                .json(&Value::Object(body))
                .send()
                .await?
        }
        Commands::Filter { file } => {
            let tablets: Value = serde_json::from_str(&std::fs::read_to_string(file)?)?;
            client.post(format!("{}/discovery/filter", cli.url))
                .headers(headers)
                .json(&tablets)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
