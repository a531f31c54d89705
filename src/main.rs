mod config;
mod lyrics;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::Level;

use lyrics::Lookup;

/// Lookup succeeded but produced nothing worth printing.
const EXIT_NO_RESULT: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "chartlyrics-fetch",
    version,
    about = "Search chartlyrics.com for text and receive raw lyrics string back"
)]
struct Cli {
    /// Lyric text to search for.
    #[arg(short = 's', long = "searchterm")]
    search_term: String,

    /// Safeguard for minimum expected lyric lines.
    #[arg(short = 'l', long = "minlines")]
    min_lines: usize,

    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    /// Log fetches and scan details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let client = cfg.api.client()?;

    let lookup = lyrics::fetch_lyrics(&client, &cli.search_term, cli.min_lines)
        .await
        .context("Lyrics Fetch Error")?;

    match lookup {
        Lookup::Found(payload) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{payload}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Lookup::NoResult(missing) => {
            eprintln!("Lyrics Fetch Error: {missing}");
            Ok(ExitCode::from(EXIT_NO_RESULT))
        }
        Lookup::Rejected(rejection) => {
            println!("{rejection}");
            Ok(ExitCode::from(EXIT_NO_RESULT))
        }
    }
}
