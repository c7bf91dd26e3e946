use std::path::PathBuf;

use albion_market_data::GatewayConfig;

pub struct Config {
    /// `item_db.json` to resolve names against; aliases and raw ids work without it.
    pub item_db: Option<PathBuf>,
    pub gateway: GatewayConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let item_db = std::env::var("ALBION_ITEM_DB")
            .ok()
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        let gateway = GatewayConfig::from_env()?;
        Ok(Self { item_db, gateway })
    }
}
