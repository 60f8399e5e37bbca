// ABOUTME: CLI binary for the tripharvest scraper: iterates a site list, persists JSON, prints a summary.
// ABOUTME: Also offers an --analyze mode that summarizes a previously saved result file.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use regex::Regex;
use serde::Deserialize;
use tripharvest_extract::{ResultStore, WebsiteExtractionPipeline};

#[derive(Parser, Debug)]
#[command(name = "tripharvest")]
#[command(about = "Extract structured travel-package listings from agency websites")]
struct Args {
    /// JSON file mapping site names to {url, category, popularity}
    #[arg(short = 's', long = "sites")]
    sites: Option<PathBuf>,

    /// Output file for the domain-keyed result collection
    #[arg(short = 'o', long = "output", default_value = "website_packages.json")]
    output: PathBuf,

    /// Only scrape sites in this category (requires --sites)
    #[arg(long = "category")]
    category: Option<String>,

    /// Summarize an existing result file instead of scraping
    #[arg(long = "analyze")]
    analyze: bool,

    /// Seconds to wait between consecutive sites
    #[arg(long = "site-delay", default_value_t = 5)]
    site_delay: u64,

    /// Package cap per site (clamped to 10)
    #[arg(long = "max-packages", default_value_t = 10)]
    max_packages: usize,

    /// Disable pacing delays between package fetches
    #[arg(long = "no-pacing")]
    no_pacing: bool,

    /// Site URLs to scrape (in addition to --sites)
    urls: Vec<String>,
}

/// One entry of the site-list file.
#[derive(Debug, Clone, Deserialize)]
struct SiteEntry {
    url: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    popularity: Option<String>,
}

fn load_sites(args: &Args) -> anyhow::Result<BTreeMap<String, SiteEntry>> {
    let mut sites: BTreeMap<String, SiteEntry> = BTreeMap::new();

    if let Some(path) = &args.sites {
        let data = fs::read_to_string(path)?;
        let parsed: BTreeMap<String, SiteEntry> = serde_json::from_str(&data)?;
        sites.extend(parsed);
    }

    for url in &args.urls {
        sites.insert(
            url.clone(),
            SiteEntry {
                url: url.clone(),
                category: None,
                popularity: None,
            },
        );
    }

    if let Some(category) = &args.category {
        sites.retain(|_, entry| entry.category.as_deref() == Some(category.as_str()));
    }

    Ok(sites)
}

/// Summary statistics over a saved result collection.
fn analyze(store: &ResultStore) {
    let total_sites = store.len();
    let total_packages: usize = store.records().map(|r| r.packages.len()).sum();

    let mut by_category: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    let mut destinations: BTreeMap<String, usize> = BTreeMap::new();
    let mut prices: Vec<u64> = Vec::new();

    let digits = Regex::new(r"(\d+)").expect("digit pattern");
    for record in store.records() {
        let category = record.category.clone().unwrap_or_else(|| "Unknown".to_string());
        let entry = by_category.entry(category).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += record.packages.len();

        for package in &record.packages {
            if let Some(dest) = &package.destination {
                *destinations.entry(dest.clone()).or_insert(0) += 1;
            }
            if let Some(price) = &package.price {
                let stripped = price.replace(',', "");
                if let Some(m) = digits.find(&stripped) {
                    if let Ok(n) = m.as_str().parse::<u64>() {
                        prices.push(n);
                    }
                }
            }
        }
    }

    println!("\n=== Scraping Analysis ===");
    println!("Total websites scraped: {}", total_sites);
    println!("Total packages found: {}", total_packages);

    println!("\nBy Category:");
    for (category, (count, packages)) in &by_category {
        println!("  {}: {} sites, {} packages", category, count, packages);
    }

    let mut popular: Vec<(&String, &usize)> = destinations.iter().collect();
    popular.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    println!("\nPopular Destinations:");
    for (dest, count) in popular.iter().take(10) {
        println!("  {}: {} packages", dest, count);
    }

    if !prices.is_empty() {
        let min = prices.iter().min().copied().unwrap_or(0);
        let max = prices.iter().max().copied().unwrap_or(0);
        let avg = prices.iter().sum::<u64>() / prices.len() as u64;
        println!("\nPrice Range: ₹{} - ₹{}", min, max);
        println!("Average Price: ₹{}", avg);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    if args.analyze {
        let store = ResultStore::load_json(&args.output)?;
        analyze(&store);
        return Ok(());
    }

    let sites = load_sites(&args)?;
    if sites.is_empty() {
        anyhow::bail!("no websites to scrape: pass URLs or --sites FILE");
    }

    let pipeline = WebsiteExtractionPipeline::builder()
        .max_packages(args.max_packages)
        .pacing(!args.no_pacing)
        .build()?;

    tracing::info!(count = sites.len(), "starting scrape run");
    let mut store = ResultStore::new();
    let total = sites.len();

    for (i, (name, entry)) in sites.iter().enumerate() {
        tracing::info!(
            site = %name,
            url = %entry.url,
            popularity = entry.popularity.as_deref().unwrap_or(""),
            "scraping site"
        );

        let mut record = pipeline.run(&entry.url).await;
        record.company_name = Some(name.clone());
        record.category = entry.category.clone();

        tracing::info!(
            site = %name,
            packages = record.packages.len(),
            error = record.error.as_deref().unwrap_or(""),
            "site done"
        );
        store.insert(record);

        if i + 1 < total && args.site_delay > 0 {
            tokio::time::sleep(Duration::from_secs(args.site_delay)).await;
        }
    }

    store.save_json(&args.output)?;
    println!(
        "Scraped {} websites, results saved to {}",
        store.len(),
        args.output.display()
    );
    analyze(&store);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}
