use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

use webhook_receiver::WebhookMessage;

#[derive(Parser)]
#[command(name = "webhook-cli")]
#[command(about = "Tools for the webhook receiver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map a stored acknowledgment envelope to a WebhookMessage
    Transform {
        /// Envelope JSON file, or `-` for stdin
        input: PathBuf,
    },
    /// Send a test webhook to a running receiver
    Send {
        #[arg(short, long, default_value = "http://localhost:5002")]
        url: String,

        /// JSON body to send
        #[arg(long, conflicts_with = "form")]
        json: Option<String>,

        /// Form field as key=value (repeatable)
        #[arg(long, value_parser = parse_key_value)]
        form: Vec<(String, String)>,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Transform { input } => {
            let envelope = read_input(&input)?;
            let message = WebhookMessage::from_envelope_str(&envelope)?;
            println!("{}", serde_json::to_string_pretty(&message)?);
        }
        Commands::Send { url, json, form } => {
            let client = reqwest::Client::new();
            let endpoint = format!("{}/webhook", url.trim_end_matches('/'));
            let request = match json {
                Some(body) => {
                    let body: Value = serde_json::from_str(&body)?;
                    client.post(&endpoint).json(&body)
                }
                None => client.post(&endpoint).form(&form),
            };
            print_response(request.send().await?).await?;
        }
    }

    Ok(())
}

fn read_input(input: &Path) -> std::io::Result<String> {
    if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input)
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: receiver returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
