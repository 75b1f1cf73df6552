use clap::{Parser, Subcommand};
use reqwest::Url;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Client for a running edge-relay service", long_about = None)]
struct Cli {
    /// Base URL of the relay.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the health endpoint
    Health {
        #[arg(long, default_value = "/health")]
        path: String,
    },
    /// Download the configuration document
    Config {
        /// raw|proxy|base58|proxy-base58 or 0-3
        #[arg(short, long, default_value = "raw")]
        format: String,
        #[arg(short, long)]
        source: Option<String>,
        #[arg(short, long)]
        prefix: Option<String>,
    },
    /// Fetch a URL through the relay
    Fetch {
        target: String,
        /// Print response headers before the body
        #[arg(short = 'i', long)]
        include: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder().no_proxy().build()?;
    let base = Url::parse(&cli.url)?;

    match cli.command {
        Commands::Health { path } => {
            let res = client.get(base.join(&path)?).send().await?;
            let status = res.status();
            println!("{} {}", status.as_u16(), res.text().await?);
            if !status.is_success() {
                std::process::exit(1);
            }
        }
        Commands::Config { format, source, prefix } => {
            let mut endpoint = base.join("/")?;
            {
                let mut query = endpoint.query_pairs_mut();
                query.append_pair("format", &format);
                if let Some(source) = &source {
                    query.append_pair("source", source);
                }
                if let Some(prefix) = &prefix {
                    query.append_pair("prefix", prefix);
                }
            }
            let res = client.get(endpoint).send().await?;
            print_response(res, false).await?;
        }
        Commands::Fetch { target, include } => {
            // The relay reads the raw tail after `url=`, so the target is
            // appended unencoded.
            let endpoint = format!("{}/?url={}", cli.url.trim_end_matches('/'), target);
            let res = client.get(endpoint).send().await?;
            print_response(res, include).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response, include: bool) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if include {
        println!("{status}");
        for (name, value) in res.headers() {
            println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
        }
        println!();
    }

    let is_json = res
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: relay returned status {status}");
        eprintln!("Response: {text}");
        std::process::exit(1);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) if is_json => println!("{}", serde_json::to_string_pretty(&json)?),
        _ => println!("{text}"),
    }
    Ok(())
}
