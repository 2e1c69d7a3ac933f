use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "mockify-cli")]
#[command(about = "Management CLI for the mockify stub server", long_about = None)]
struct Cli {
    #[arg(short, long, env = "MOCKIFY_URL", default_value = "http://localhost:8001")]
    url: String,

    /// Bearer token, when the server was started with an admin key.
    #[arg(short, long, env = "MOCKIFY_ADMIN_KEY", hide_env_values = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List body-matched mocks and their keys
    List,
    /// Register a route record from a JSON file
    Add { file: PathBuf },
    /// Delete a body-matched mock by key (as shown by `list`)
    Delete { key: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(key) = &cli.key {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", key))?,
        );
    }

    match cli.command {
        Commands::List => {
            let res = client
                .get(format!("{}/list", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_json(res).await?;
        }
        Commands::Add { file } => {
            let record = std::fs::read(&file)?;
            serde_json::from_slice::<Value>(&record)?;
            let res = client
                .post(format!("{}/add", cli.url))
                .headers(headers)
                .header(CONTENT_TYPE, "application/json")
                .body(record)
                .send()
                .await?;
            print_json(res).await?;
        }
        Commands::Delete { key } => {
            let res = client
                .post(format!("{}/delete", cli.url))
                .headers(headers)
                .body(key)
                .send()
                .await?;
            print_text(res).await?;
        }
    }

    Ok(())
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        return print_failure(res).await;
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

async fn print_text(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    if !res.status().is_success() {
        return print_failure(res).await;
    }
    println!("{}", res.text().await?);
    Ok(())
}

async fn print_failure(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Error: mockify returned status {}", res.status());
    if let Ok(text) = res.text().await {
        eprintln!("Response: {}", text);
    }
    std::process::exit(1);
}
