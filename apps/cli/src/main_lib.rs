use std::sync::Arc;

use albion_market_data::{
    AliasTable, ItemIndex, MarketDataGateway, ResolutionEngine, SearchEngine,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub engine: ResolutionEngine,
    pub search: SearchEngine,
    pub gateway: MarketDataGateway,
    pub index: Arc<ItemIndex>,
}

pub fn init_tracing() {
    let log_format = std::env::var("ALBION_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays parseable JSON.
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let index = match &config.item_db {
        Some(path) => ItemIndex::from_json_file(path)?,
        None => {
            tracing::warn!("ALBION_ITEM_DB is not set; only aliases and raw ids will resolve");
            ItemIndex::from_records(Vec::new())?
        }
    };
    let aliases = Arc::new(AliasTable::builtin());
    let index = Arc::new(index);
    let gateway = MarketDataGateway::albion(config.gateway.clone())?;
    tracing::info!(
        "Market data from {} (source {})",
        config.gateway.base_url,
        gateway.source_id()
    );

    Ok(AppState {
        engine: ResolutionEngine::new(aliases.clone(), index.clone()),
        search: SearchEngine::new(aliases, index.clone()),
        gateway,
        index,
    })
}
