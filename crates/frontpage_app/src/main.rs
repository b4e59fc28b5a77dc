//! Command-line front end: parse flags, run the scrape, print JSON.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;

use frontpage_engine::{
    scrape_listing, FetchSettings, Listing, ReqwestFetcher, DEFAULT_PAGE_CAPACITY,
};

/// Print ranked stories from a link-aggregation listing as JSON.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// How many posts to print.
    #[arg(
        short,
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    posts: u8,

    /// Read the newest listing instead of the front page.
    #[arg(long)]
    new: bool,

    /// Log debug detail to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    scrape_logging::initialize_cli(level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let listing = if args.new {
        Listing::Newest
    } else {
        Listing::FrontPage
    };
    let settings = FetchSettings {
        listing,
        ..FetchSettings::default()
    };
    let fetcher = Arc::new(ReqwestFetcher::new(settings));

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let stories = runtime
        .block_on(scrape_listing(
            fetcher,
            args.posts as usize,
            DEFAULT_PAGE_CAPACITY,
        ))
        .context("scrape failed")?;

    let encoded =
        serde_json::to_string_pretty(&stories).context("failed to encode stories")?;
    println!("{encoded}");
    Ok(())
}
