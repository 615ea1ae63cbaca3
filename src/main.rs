mod chat;
mod config;
mod engine;
mod gateway;
mod i18n;
mod intent;
mod loan;
mod types;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod testing;

use std::io::Write;
use std::path::PathBuf;

use tokio::io::AsyncBufReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-V" => {
                println!("lendbot {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" => {
                println!("lendbot {}", env!("CARGO_PKG_VERSION"));
                println!("{}\n", env!("CARGO_PKG_DESCRIPTION"));
                println!("Usage: lendbot\n");
                println!("Reads config.toml from the working directory. Set GEMINI_API_KEY");
                println!("(environment or .env) to enable the assistant gateway; without it");
                println!("the deterministic engine answers every turn.");
                println!("\nOptions:");
                println!("  -h, --help       Print help");
                println!("  -V, --version    Print version");
                return Ok(());
            }
            _ => {}
        }
    }

    let config = config::AppConfig::load(&PathBuf::from("config.toml"))?;

    // Run async
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(config))
}

async fn run(config: config::AppConfig) -> anyhow::Result<()> {
    let locale = i18n::Locale::from_tag(&config.chat.default_locale);

    let mut service = if config.assistant.is_configured() {
        let gw = gateway::GeminiGateway::new(&config.assistant)?;
        info!(model = %config.assistant.model, "assistant gateway enabled");
        chat::ChatService::with_gateway(locale, Box::new(gw))
    } else {
        info!("no assistant credential configured; deterministic engine only");
        chat::ChatService::new(locale)
    };

    println!("{}", service.greeting());
    println!("(type /quit to leave)\n");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "/quit" {
            break;
        }

        let reply = service.process(input).await;
        println!("{}\n", reply.response);
    }

    Ok(())
}
