//! Scholar - renders an academic website from JSON data and HTML templates.

mod build;
mod cli;
mod config;
mod data;
mod dom;
mod embed;
mod init;
mod interact;
mod lifecycle;
mod logger;
mod prompt;
mod render;
mod search;
mod serve;

use anyhow::{Result, bail};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use data::{DataLoader, PageData};
use init::new_site;
use interact::theme::Theme;
use serve::serve_site;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Init { name } => new_site(&config, name.is_some()),
        Commands::Build { .. } => build_site(&config).await,
        Commands::Serve { .. } => {
            build_site(&config).await?;
            serve_site(&config)
        }
        Commands::Search { query } => {
            let data = load_data(&config).await?;
            match query {
                Some(query) => {
                    print_hits(&data, query);
                    Ok(())
                }
                None => prompt::run(&config, &data),
            }
        }
        Commands::Theme { toggle } => theme(&config, *toggle),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => bail!("Config file not found."),
        _ => {}
    }

    if !cli.is_init() {
        config.validate(cli)?;
    }

    Ok(config)
}

async fn load_data(config: &SiteConfig) -> Result<PageData> {
    let loader = DataLoader::from_config(config)?;
    match loader.load().await {
        Ok(data) => Ok(data),
        Err(err) => {
            log!("error"; "{}", err.user_message());
            Err(err.into())
        }
    }
}

fn print_hits(data: &PageData, query: &str) {
    if query.trim().chars().count() < search::MIN_QUERY_LEN {
        log!("search"; "query needs at least {} characters", search::MIN_QUERY_LEN);
        return;
    }
    let hits = search::search(data, query);
    if hits.is_empty() {
        log!("search"; "No results found");
    }
    for hit in hits {
        log!("search"; "{}: {} ({}) {}", hit.kind, hit.title, hit.section.page(), hit.description);
    }
}

fn theme(config: &SiteConfig, toggle: bool) -> Result<()> {
    let path = config.theme_state_path();
    let mut theme = Theme::load(&path, config.site.theme);
    if toggle {
        theme = theme.toggled();
        theme.save(&path)?;
    }
    log!("theme"; "{theme}");
    Ok(())
}
