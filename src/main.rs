//! identifiers.org search bar - Entry Point

use clap::Parser;
use idorg_bar::config::ResolvedConfig;
use idorg_bar::resolver::{CurieResolver, ResolverClient};
use idorg_bar::search::{EbiSearchClient, NamespaceSearch};
use std::path::PathBuf;
use tracing::info;

/// identifiers.org search bar - find and resolve compact identifiers
#[derive(Parser, Debug)]
#[command(name = "idorg-bar")]
#[command(version)]
#[command(about = "Terminal search bar for identifiers.org compact identifiers")]
pub struct Args {
    /// Initial query text
    #[arg(conflicts_with = "query")]
    pub initial: Option<String>,

    /// Initial query text
    #[arg(short, long)]
    pub query: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Classify QUERY against live suggestions and exit (0 when valid)
    #[arg(long, value_name = "QUERY", conflicts_with = "resolve")]
    pub check: Option<String>,

    /// Resolve CURIE, print the host event and exit (0 when resolved)
    #[arg(long, value_name = "CURIE")]
    pub resolve: Option<String>,

    /// Quiet period before suggestions are fetched, in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Keep the search service's ranking when the query looks like a local id
    #[arg(long)]
    pub no_rescore: bool,
}

impl Args {
    fn initial_query(&self) -> String {
        self.query
            .clone()
            .or_else(|| self.initial.clone())
            .unwrap_or_default()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = idorg_bar::config::load_config_with_precedence(args.config.clone())?;
        let merged = idorg_bar::config::merge_config(config_file);
        let with_env = idorg_bar::config::apply_env_overrides(merged);
        idorg_bar::config::apply_cli_overrides(with_env, args.debounce_ms, args.no_rescore)
    };

    idorg_bar::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    if let Some(query) = args.check.as_deref() {
        let valid = check(&config, query)?;
        std::process::exit(if valid { 0 } else { 1 });
    }

    if let Some(curie) = args.resolve.as_deref() {
        let resolved = resolve(&config, curie)?;
        std::process::exit(if resolved { 0 } else { 1 });
    }

    idorg_bar::view::run(&config, args.initial_query())?;

    Ok(())
}

/// Fetch candidates once, classify `query` and print the outcome.
fn check(config: &ResolvedConfig, query: &str) -> Result<bool, Box<dyn std::error::Error>> {
    let client = EbiSearchClient::new(config.search_settings()?)?;
    let candidates = client.fetch(query, config.suggestion_page_size);
    let (validity, parts) = idorg_bar::parser::evaluate_query(query, &candidates);

    println!("state:    {validity}");
    if let Some(resource) = parts.resource() {
        println!("resource: {resource}");
    }
    println!("prefix:   {}", parts.prefix);
    println!("id:       {}", parts.id);
    if let Some(uri) = idorg_bar::view::resolvable_uri(&config.identifiers_url, validity, &parts) {
        println!("uri:      {uri}");
    }

    Ok(validity.is_submittable())
}

/// Resolve `curie` and print the host event.
fn resolve(config: &ResolvedConfig, curie: &str) -> Result<bool, Box<dyn std::error::Error>> {
    let settings = config.resolver_settings()?;
    let identifiers_url = settings.identifiers_url.clone();
    let client = ResolverClient::new(settings)?;
    let resolution = client.resolve(curie);
    let resolved = resolution.is_resolved();
    let event = resolution.into_event(&identifiers_url);

    println!("{}", event.name());
    println!("{}", serde_json::to_string_pretty(&event.detail())?);

    Ok(resolved)
}
