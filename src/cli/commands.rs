//! Command implementations for the planfeed CLI
//!
//! Contains command execution logic, logging setup and the console
//! presentation sink used by the watch loop.

use std::sync::Arc;

use colored::Colorize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::app::adapters::presentation::PresentationSink;
use crate::app::models::{UnitStatus, format_area, format_price};
use crate::app::services::feed_parser::field_parsers::normalize_unit_id;
use crate::app::services::feed_parser::{FeedParser, ParseResult};
use crate::app::services::refresh_engine::{FeedFetcher, RefreshEngine};
use crate::app::services::unit_registry::UnitRegistry;
use crate::cli::args::{Args, Commands, DetailsArgs, InspectArgs, WatchArgs};
use crate::config::{Config, FeedShape};
use crate::{Error, Result};

/// Main command dispatcher
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<()> {
    match args.command {
        Some(Commands::Watch(watch_args)) => watch(watch_args, cancellation_token).await,
        Some(Commands::Inspect(inspect_args)) => inspect(inspect_args).await,
        Some(Commands::Details(details_args)) => details(details_args).await,
        None => Ok(()),
    }
}

/// Set up structured logging to stderr
fn setup_logging(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("planfeed={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

// =============================================================================
// watch
// =============================================================================

/// Console sink printing registry updates as the loop runs
struct ConsoleSink;

impl PresentationSink for ConsoleSink {
    fn registry_applied(&self, registry: &Arc<UnitRegistry>) {
        let mut available = 0usize;
        let mut reserved = 0usize;
        let mut sold = 0usize;
        for unit in registry.units() {
            match unit.status {
                UnitStatus::Available => available += 1,
                UnitStatus::Reserved => reserved += 1,
                UnitStatus::Sold => sold += 1,
            }
        }

        println!(
            "registry updated: {} units ({} {} / {} {} / {} {})",
            registry.len(),
            available,
            "available".green(),
            reserved,
            "reserved".yellow(),
            sold,
            "sold".red(),
        );
    }

    fn data_unavailable(&self) {
        println!("{}", "feed data unavailable".red().bold());
    }
}

async fn watch(args: WatchArgs, cancellation_token: CancellationToken) -> Result<()> {
    setup_logging(&args.log_level);

    let config = args.to_config();
    config.validate()?;

    info!(
        "watching feed every {} ms: {}",
        config.refresh_interval_ms, config.feed_url
    );

    let engine = Arc::new(RefreshEngine::new(&config)?);
    let sink: Arc<dyn PresentationSink> = Arc::new(ConsoleSink);

    Arc::clone(&engine).run(cancellation_token, sink).await;
    Ok(())
}

// =============================================================================
// inspect / details
// =============================================================================

/// Read the feed from a URL or a local file
async fn load_source(source: &str, shape: FeedShape) -> Result<ParseResult> {
    let text = if source.starts_with("http://") || source.starts_with("https://") {
        let config = Config {
            feed_url: source.to_string(),
            feed_shape: shape,
            ..Config::default()
        };
        FeedFetcher::new(&config)?.fetch_csv().await?
    } else {
        std::fs::read_to_string(source)
            .map_err(|e| Error::io(format!("failed to read {}", source), e))?
    };

    Ok(FeedParser::new(shape).parse(&text))
}

async fn inspect(args: InspectArgs) -> Result<()> {
    setup_logging(&args.log_level);

    let result = load_source(&args.source, args.shape).await?;
    let registry = &result.snapshot.registry;

    if registry.is_empty() {
        return Err(Error::feed_format(format!(
            "no unit rows parsed from {}",
            args.source
        )));
    }

    println!(
        "{:<6} {:<8} {:<10} {:>9} {:>12} {:>11} {:>10}  {}",
        "ID", "KIND", "STATUS", "SPOT m²", "STORAGE m²", "TOTAL m²", "PRICE/m²", "LINKS"
    );
    for unit in registry.units() {
        let status = match unit.status {
            UnitStatus::Available => unit.status.css_class().green(),
            UnitStatus::Reserved => unit.status.css_class().yellow(),
            UnitStatus::Sold => unit.status.css_class().red(),
        };

        let mut links = Vec::new();
        if let Some(pair) = &unit.pair_id {
            links.push(format!("pair:{}", pair));
        }
        if let Some(storage) = &unit.storage_id {
            links.push(format!("storage:{}", storage));
        }

        println!(
            "{:<6} {:<8} {:<10} {:>9} {:>12} {:>11} {:>10}  {}",
            unit.id,
            format!("{:?}", unit.kind).to_lowercase(),
            status,
            format_area(unit.spot_area),
            format_area(unit.storage_area),
            format_area(unit.total_area),
            format_price(unit.price_per_sqm),
            links.join(" "),
        );
    }

    println!();
    println!(
        "{} units from {} rows ({} skipped, {} duplicates), snapshot timestamp {}",
        result.stats.units_parsed,
        result.stats.total_rows,
        result.stats.rows_skipped,
        result.stats.duplicates_replaced,
        result
            .snapshot
            .updated_at
            .map(|ts| ts.to_string())
            .unwrap_or_else(|| "none".to_string()),
    );

    Ok(())
}

async fn details(args: DetailsArgs) -> Result<()> {
    setup_logging(&args.log_level);

    let result = load_source(&args.source, args.shape).await?;
    let registry = &result.snapshot.registry;

    let Some(details) = registry.details(&args.unit_id) else {
        return Err(match normalize_unit_id(&args.unit_id) {
            Some(canonical) => Error::unknown_unit(canonical),
            None => Error::invalid_unit_id(args.unit_id.clone()),
        });
    };

    println!("{}", format!("Unit {}", details.id).bold());
    println!("  status:  {}", details.status_label);
    println!("  related: {}", details.related.join(", "));
    println!("  area:    {} м²", details.area_display);
    println!("  price:   {} ₽", details.price_display);

    Ok(())
}
