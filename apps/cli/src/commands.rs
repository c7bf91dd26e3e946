use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use albion_market_data::gateway::{DEFAULT_GOLD_COUNT, DEFAULT_HISTORY_TIME_SCALE};
use albion_market_data::{CanonicalId, City, ResolveError, DEFAULT_SEARCH_LIMIT};

use crate::main_lib::AppState;

#[derive(Parser)]
#[command(name = "albion-lookup")]
#[command(about = "Resolve Albion Online items and look up market data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Resolve a name, alias or id to a canonical item id
    Resolve {
        /// Korean or English name, alias, or item id
        query: String,
    },

    /// List items matching a keyword
    Search {
        keyword: String,

        /// Maximum number of hits
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },

    /// Current order-book prices for an item
    Prices {
        query: String,

        /// City to query (repeatable); every market city when omitted
        #[arg(short = 'l', long = "location")]
        locations: Vec<String>,
    },

    /// Recent gold prices
    Gold {
        /// Number of samples
        #[arg(short, long, default_value_t = DEFAULT_GOLD_COUNT)]
        count: u32,
    },

    /// Trade history for an item in one city
    History {
        query: String,

        #[arg(short, long, default_value = "Caerleon")]
        location: String,

        /// Bucket width in hours
        #[arg(short, long, default_value_t = DEFAULT_HISTORY_TIME_SCALE)]
        time_scale: u32,
    },
}

/// Upstream location name for a user-supplied city (English or Korean).
///
/// Unknown names pass through unchanged so non-city markets still work.
fn location_name(raw: &str) -> String {
    raw.parse::<City>()
        .map(|city| city.api_name().to_string())
        .unwrap_or_else(|_| raw.trim().to_string())
}

fn resolve_item(state: &AppState, query: &str) -> Result<CanonicalId, ResolveError> {
    state
        .engine
        .resolve_detailed(query)
        .map(|resolved| resolved.id)
}

fn display_name(state: &AppState, id: &CanonicalId) -> String {
    state
        .index
        .display_name(id.as_str())
        .unwrap_or(id.as_str())
        .to_string()
}

pub async fn run(state: &AppState, command: Command) -> anyhow::Result<Value> {
    match command {
        Command::Resolve { query } => Ok(match state.engine.resolve_detailed(&query) {
            Ok(resolved) => json!({
                "query": query,
                "name": display_name(state, &resolved.id),
                "resolved": resolved,
            }),
            Err(ResolveError::Ambiguous { candidates, .. }) => json!({
                "query": query,
                "error": "ambiguous",
                "candidates": candidates,
            }),
            Err(ResolveError::NotFound { .. }) => json!({
                "query": query,
                "error": "not_found",
            }),
        }),

        Command::Search { keyword, limit } => {
            let hits = state.search.search(&keyword, limit);
            Ok(json!({ "keyword": keyword, "hits": hits }))
        }

        Command::Prices { query, locations } => {
            let item = resolve_item(state, &query)?;
            let quotes = if locations.is_empty() {
                state.gateway.fetch_prices_default(&item).await
            } else {
                let locations: Vec<String> =
                    locations.iter().map(|l| location_name(l)).collect();
                state.gateway.fetch_prices(&item, &locations).await
            };
            Ok(json!({
                "item": item,
                "name": display_name(state, &item),
                "quotes": quotes,
            }))
        }

        Command::Gold { count } => {
            let samples = state.gateway.fetch_gold(count).await;
            Ok(json!({ "count": count, "samples": samples }))
        }

        Command::History {
            query,
            location,
            time_scale,
        } => {
            let item = resolve_item(state, &query)?;
            let location = location_name(&location);
            let points = state
                .gateway
                .fetch_history(&item, &location, time_scale)
                .await;
            Ok(json!({
                "item": item,
                "name": display_name(state, &item),
                "location": location,
                "time_scale": time_scale,
                "points": points,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use albion_market_data::{
        AliasTable, GatewayConfig, GoldSample, HistoryPoint, ItemIndex, MarketDataError,
        MarketDataGateway, MarketDataSource, PriceQuote, ResolutionEngine, SearchEngine,
    };
    use async_trait::async_trait;

    /// Echoes the requested locations back as empty quotes.
    struct EchoSource;

    #[async_trait]
    impl MarketDataSource for EchoSource {
        fn id(&self) -> &'static str {
            "ECHO"
        }

        async fn fetch_prices(
            &self,
            item: &CanonicalId,
            locations: &[String],
        ) -> Result<Vec<PriceQuote>, MarketDataError> {
            Ok(locations
                .iter()
                .map(|city| PriceQuote {
                    item_id: item.to_string(),
                    city: city.clone(),
                    ..PriceQuote::default()
                })
                .collect())
        }

        async fn fetch_gold(&self, _count: u32) -> Result<Vec<GoldSample>, MarketDataError> {
            Ok(Vec::new())
        }

        async fn fetch_history(
            &self,
            _item: &CanonicalId,
            _location: &str,
            _time_scale: u32,
        ) -> Result<Vec<HistoryPoint>, MarketDataError> {
            Ok(Vec::new())
        }
    }

    fn state() -> AppState {
        let index = Arc::new(
            ItemIndex::from_json_str(
                r#"{
                    "T4_BAG": {"ko": "숙련자의 가방", "en": "Adept's Bag"},
                    "T5_BAG": {"ko": "전문가의 가방", "en": "Expert's Bag"}
                }"#,
            )
            .unwrap(),
        );
        let aliases = Arc::new(AliasTable::builtin());
        AppState {
            engine: ResolutionEngine::new(aliases.clone(), index.clone()),
            search: SearchEngine::new(aliases, index.clone()),
            gateway: MarketDataGateway::new(Arc::new(EchoSource), GatewayConfig::default())
                .unwrap(),
            index,
        }
    }

    #[test]
    fn test_parse_prices_with_locations() {
        let cli = Cli::try_parse_from([
            "albion-lookup",
            "prices",
            "가방",
            "-l",
            "카얼레온",
            "--location",
            "Fort Sterling",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::Prices {
                query: "가방".to_string(),
                locations: vec!["카얼레온".to_string(), "Fort Sterling".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["albion-lookup", "gold"]).unwrap();
        assert_eq!(cli.command, Command::Gold { count: 24 });

        let cli = Cli::try_parse_from(["albion-lookup", "history", "T4_BAG"]).unwrap();
        assert_eq!(
            cli.command,
            Command::History {
                query: "T4_BAG".to_string(),
                location: "Caerleon".to_string(),
                time_scale: 6,
            }
        );
    }

    #[test]
    fn test_location_name() {
        assert_eq!(location_name("카얼레온"), "Caerleon");
        assert_eq!(location_name("fort sterling"), "Fort Sterling");
        assert_eq!(location_name(" Black Market "), "Black Market");
    }

    #[tokio::test]
    async fn test_resolve_outputs() {
        let state = state();

        let out = run(&state, Command::Resolve { query: "가방".to_string() })
            .await
            .unwrap();
        assert_eq!(out["resolved"]["id"], "T4_BAG");
        assert_eq!(out["resolved"]["source"], "exact_alias");
        assert_eq!(out["name"], "숙련자의 가방");

        let out = run(&state, Command::Resolve { query: "의 가방".to_string() })
            .await
            .unwrap();
        assert_eq!(out["error"], "ambiguous");
        assert_eq!(out["candidates"], json!(["T4_BAG", "T5_BAG"]));
    }

    #[tokio::test]
    async fn test_prices_translates_locations() {
        let out = run(
            &state(),
            Command::Prices {
                query: "t4_bag".to_string(),
                locations: vec!["마트록".to_string()],
            },
        )
        .await
        .unwrap();
        assert_eq!(out["item"], "T4_BAG");
        assert_eq!(out["quotes"][0]["city"], "Martlock");
    }

    #[tokio::test]
    async fn test_unresolvable_item_is_an_error() {
        let result = run(
            &state(),
            Command::History {
                query: "존재하지않음".to_string(),
                location: "Caerleon".to_string(),
                time_scale: 6,
            },
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_search_output() {
        let out = run(
            &state(),
            Command::Search {
                keyword: "bag".to_string(),
                limit: 5,
            },
        )
        .await
        .unwrap();
        assert_eq!(out["hits"].as_array().unwrap().len(), 2);
        assert_eq!(out["hits"][0]["source"]["kind"], "dataset");
    }
}
