//! PriceScout CLI
//!
//! Command-line interface for the product-search client.
//! Provides both one-shot search and interactive TUI modes.

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{HumanDuration, ProgressBar};
use pricescout::{
    format_price, format_rating, EndpointMode, SearchClient, SearchConfig, DEFAULT_BASE_URL,
};
use std::time::{Duration, Instant};

/// PriceScout - Terminal product-search client
///
/// Posts queries to a product-search backend and renders the returned
/// list with prices, ratings and sources.
#[derive(Parser)]
#[command(name = "pricescout")]
#[command(author = "PriceScout Contributors")]
#[command(version)]
#[command(about = "Terminal product-search client", long_about = None)]
struct Cli {
    /// Base URL of the product-search backend
    /// (falls back to $PRICESCOUT_BASE_URL, then http://127.0.0.1:8000)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for products and print the results
    Search {
        /// Search query (use -- before the query if it starts with -)
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Maximum results (1-50)
        #[arg(short, long, default_value = "6")]
        max: u32,

        /// Use the keyless mock endpoint
        #[arg(long)]
        mock: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: String,
    },

    /// Launch the interactive TUI
    Tui {
        /// Maximum results (1-50)
        #[arg(short, long, default_value = "6")]
        max: u32,

        /// Start with the mock endpoint enabled
        #[arg(long)]
        mock: bool,
    },

    /// Check backend health
    Health,
}

fn main() {
    // Initialize logging
    pricescout::logging::init();
    pricescout::logging::info("MAIN", "PriceScout starting up");

    let cli = Cli::parse();

    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("PRICESCOUT_BASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let result = match cli.command {
        Commands::Search {
            query,
            max,
            mock,
            output,
        } => cmd_search(&base_url, &query, max, mock, &output),

        Commands::Tui { max, mock } => cmd_tui(&base_url, max, mock),

        Commands::Health => cmd_health(&base_url),
    };

    if let Err(e) = result {
        pricescout::logging::error("MAIN", &e.to_string());
        pricescout::logging::flush();
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

/// One-shot search command implementation
fn cmd_search(
    base_url: &str,
    query: &str,
    max: u32,
    mock: bool,
    output_format: &str,
) -> pricescout::Result<()> {
    let client = SearchClient::new(base_url)?;
    let mode = if mock { EndpointMode::Mock } else { EndpointMode::Live };
    let start = Instant::now();

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Searching '{}'...", query.trim()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = client.search(query, max, mode);
    spinner.finish_and_clear();
    let response = result?;

    if output_format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&response)
                .map_err(|e| pricescout::PriceScoutError::InvalidResponse(e.to_string()))?
        );
        return Ok(());
    }

    println!(
        "{} {} results for {} in {}",
        style("→").cyan().bold(),
        response.products.len(),
        style(query.trim()).yellow(),
        HumanDuration(start.elapsed())
    );

    if response.products.is_empty() {
        println!("  {}", style("No products found.").dim());
        return Ok(());
    }

    for (i, product) in response.products.iter().enumerate() {
        let marker = if product.is_recommended {
            format!(" {}", style("\u{2605} recommended").yellow())
        } else {
            String::new()
        };
        println!("  {:>2}. {}{}", i + 1, style(&product.title).bold(), marker);
        println!(
            "      {}  rating {}  {}",
            style(format_price(product.price, product.price_raw.as_deref())).green(),
            format_rating(product.rating),
            style(product.source.as_deref().unwrap_or("\u{2014}")).cyan()
        );
        if let Some(link) = &product.link {
            println!("      {}", style(link).dim());
        }
    }

    Ok(())
}

/// Interactive TUI command implementation
fn cmd_tui(base_url: &str, max: u32, mock: bool) -> pricescout::Result<()> {
    let client = SearchClient::new(base_url)?;
    let config = SearchConfig {
        base_url: base_url.to_string(),
        max_results: max.clamp(1, 50),
        use_mock: mock,
    };
    pricescout::tui::run(client, &config)
}

/// Health command implementation
fn cmd_health(base_url: &str) -> pricescout::Result<()> {
    let client = SearchClient::new(base_url)?;
    let value = client.health()?;

    println!(
        "{} Backend at {} is reachable",
        style("→").cyan().bold(),
        style(base_url).yellow()
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&value)
            .map_err(|e| pricescout::PriceScoutError::InvalidResponse(e.to_string()))?
    );

    Ok(())
}
