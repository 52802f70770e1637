mod api;
mod cache;
mod catalog;
mod fetcher;
mod parser;
mod query;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};

use catalog::PricingModel;
use fetcher::DocumentSource;

#[derive(Parser)]
#[command(name = "freedev_catalog", about = "free-for-dev catalog parser and API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and parse the catalog, print a summary
    Fetch {
        /// Write the parsed catalog as pretty JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List tools, optionally filtered
    Tools {
        /// Case-insensitive search over name, description, and tags
        #[arg(short, long)]
        search: Option<String>,
        /// Category slug (e.g. "web-hosting"), or "all"
        #[arg(short, long)]
        category: Option<String>,
        /// Pricing models to include (free, freemium, paid, trial)
        #[arg(short, long)]
        pricing: Vec<PricingModel>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
    /// Show catalog statistics
    Stats,
    /// Serve the catalog API over HTTP
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch { output } => {
            let catalog = fetch_catalog().await?;
            println!(
                "Parsed {} tools in {} categories",
                catalog.tools.len(),
                catalog.categories.len()
            );
            if let Some(path) = output {
                std::fs::write(&path, serde_json::to_string_pretty(&catalog)?)?;
                println!("Wrote {}", path.display());
            }
            Ok(())
        }
        Commands::Tools {
            search,
            category,
            pricing,
            limit,
        } => {
            let catalog = fetch_catalog().await?;
            let filters = query::Filters {
                search,
                category,
                pricing_models: pricing,
            };
            let matched = query::filter_tools(&catalog.tools, &filters);
            if matched.is_empty() {
                println!("No tools matched.");
                return Ok(());
            }

            println!(
                "{:>3} | {:<28} | {:<24} | {:<8} | {:<28}",
                "#", "Tool", "Category", "Pricing", "Tags"
            );
            println!("{}", "-".repeat(102));
            for (i, tool) in matched.iter().take(limit).enumerate() {
                println!(
                    "{:>3} | {:<28} | {:<24} | {:<8} | {:<28}",
                    i + 1,
                    truncate(&tool.name, 28),
                    truncate(&tool.category, 24),
                    tool.pricing_model.as_str(),
                    truncate(&tool.tags.join(", "), 28),
                );
            }
            println!("\n{} of {} matching tools shown", matched.len().min(limit), matched.len());
            Ok(())
        }
        Commands::Stats => {
            let catalog = fetch_catalog().await?;
            let stats = query::catalog_stats(&catalog.tools, &catalog.categories, None);
            println!("Tools:      {}", stats.total_tools);
            println!("Categories: {}", stats.total_categories);
            println!("Free:       {}", stats.free_tools);
            println!("Freemium:   {}", stats.freemium_tools);
            println!("Updated:    {}", stats.last_updated.to_rfc3339());
            Ok(())
        }
        Commands::Serve { port } => api::serve(port).await,
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

/// One-shot pipeline for the CLI commands. The TTL cache only pays off in
/// the long-lived server, so these fetch fresh every run.
async fn fetch_catalog() -> Result<catalog::Catalog> {
    let fetcher = fetcher::HttpFetcher::new()?;
    let raw = fetcher.fetch().await?;
    Ok(parser::parse_document(&raw))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
