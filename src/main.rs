mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Result;
use application::UseCaseContainer;
use domain::entities::AppConfig;
use domain::repositories::PackageRepository;
use infrastructure::ConfigRepository;
use infrastructure::winget::WingetPackageRepository;
use presentation::{PluginHost, ResultItem, TerminalHost, WingetPlugin};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = ConfigRepository::new().load().unwrap_or_else(|err| {
        tracing::warn!("Failed to load config, using defaults: {}", err);
        AppConfig::default()
    });

    let repository: Arc<dyn PackageRepository> =
        Arc::new(WingetPackageRepository::new(config.tool.as_str()));
    let use_cases = Arc::new(UseCaseContainer::new(repository));
    let host: Arc<dyn PluginHost> = Arc::new(TerminalHost::new());
    let plugin = Arc::new(WingetPlugin::new(config, use_cases, host));

    run_terminal(plugin).await
}

/// Minimal standalone driver: every input line is treated as a query, and
/// `:run <n>` activates the n-th result from the previous listing.
async fn run_terminal(plugin: Arc<WingetPlugin>) -> Result<()> {
    println!("winglet - search winget packages");
    println!(
        "Type a search term, `:run <n>` to activate result n, \
         `:menu <n>` to list its actions, `:quit` to exit."
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_results: Vec<ResultItem> = Vec::new();

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input == ":quit" {
            break;
        }

        if let Some(index) = input.strip_prefix(":run ") {
            match index.trim().parse::<usize>() {
                Ok(n) if n < last_results.len() => {
                    plugin.activate(&last_results[n]);
                }
                _ => println!("No result with that number."),
            }
            continue;
        }

        if let Some(index) = input.strip_prefix(":menu ") {
            match index.trim().parse::<usize>() {
                Ok(n) if n < last_results.len() => {
                    for entry in plugin.context_menu(&last_results[n]) {
                        println!("  {} - {}", entry.title, entry.subtitle);
                    }
                }
                _ => println!("No result with that number."),
            }
            continue;
        }

        let results = plugin.query(input, &CancellationToken::new()).await;
        for (n, item) in results.iter().enumerate() {
            println!("[{}] {}", n, item.title);
            println!("    {}", item.subtitle);
        }
        last_results = results;
    }

    Ok(())
}
