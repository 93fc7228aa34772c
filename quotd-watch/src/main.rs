//! quotd-watch - terminal client for the quotd services
//!
//! Mirrors the web UI's flows: list a page of quotes, submit a new one, or
//! follow a quote's rating. Following fetches the quote from quotd-web,
//! renders it, then waits for the rating push and renders the updated card.
//! The subscription consumes exactly one update and is only attempted once
//! the initial fetch has succeeded.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use quotd_common::config;
use quotd_watch::bridge::ScoreBridge;
use quotd_watch::cache::{quote_key, QuoteCache};
use quotd_watch::client::QuoteApiClient;
use quotd_watch::render;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "quotd-watch", about = "Terminal client for the quotd services")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Base URL of the quotd-web API
    #[arg(
        long,
        env = "QUOTD_API_URL",
        default_value = "http://127.0.0.1:5730",
        global = true
    )]
    api_url: String,

    /// Base URL of the real-time gateway
    #[arg(long, global = true)]
    rt_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of quotes, newest first
    List {
        #[arg(long, default_value_t = 10)]
        limit: i64,

        /// Continue after this quote id (from a previous page)
        #[arg(long)]
        cursor: Option<i64>,
    },

    /// Submit a new quote, then follow its rating
    Submit {
        quote: String,

        #[arg(long)]
        author: String,
    },

    /// Follow one quote's rating
    Follow { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let client = QuoteApiClient::new(&args.api_url);

    match &args.command {
        Command::List { limit, cursor } => {
            let page = client.list_quotes(*limit, *cursor).await?;
            for quote in &page.data {
                println!("{}\n", render::card(quote));
            }

            // a page shorter than the limit is the last one
            if (page.data.len() as i64) < *limit {
                println!("(end of list)");
            } else if let Some(cursor) = page.next_cursor {
                println!("(more: --cursor {cursor})");
            }
        }

        Command::Submit { quote, author } => {
            if quote.is_empty() || author.is_empty() {
                anyhow::bail!("both quote and author are required");
            }

            let id = client.submit_quote(quote, author).await?;
            info!("Submitted quote {}", id);
            follow(&client, &args, id).await?;
        }

        Command::Follow { id } => follow(&client, &args, *id).await?,
    }

    Ok(())
}

/// Fetch, render, then merge exactly one pushed rating update
async fn follow(client: &QuoteApiClient, args: &Args, id: i64) -> Result<()> {
    let mut cache = QuoteCache::new();
    let key = quote_key(id);

    // a failed fetch ends the run here; the subscription is never attempted
    let quote = client.get_quote(id).await?;
    cache.insert(key.clone(), quote.clone());
    println!("{}", render::card(&quote));

    let rt_url = config::resolve_rt_url(args.rt_url.as_deref());
    info!("Waiting for a rating push for quote {} via {}", id, rt_url);

    let mut bridge = ScoreBridge::subscribe(&rt_url, id).await?;
    if let Some(update) = bridge.next_update().await? {
        cache.patch(&key, &update);
        if let Some(rated) = cache.get(&key) {
            println!("\n{}", render::card(rated));
        }
    } else {
        println!("\n(stream closed without a rating)");
    }

    Ok(())
}
