//! Public market data

use serde_json::{json, Value};
use tracing::{debug, info};

use super::{count_at, take_field};
use crate::api::{HttpTransport, RequestExecutor, Transport};
use crate::error::{OrionxError, Result};
use crate::types::{require_non_empty, MarketStats};

pub const DEFAULT_ORDERBOOK_LIMIT: u32 = 50;

const MARKET_QUERY: &str = r#"query sdk_market($code: ID) {
  market(code: $code) {
    code
    name
    mainCurrency { code name units }
    secondaryCurrency { code name units }
    lastTrade { price }
  }
}"#;

const MARKETS_QUERY: &str = r#"query sdk_markets {
  markets {
    code
    name
    mainCurrency { code name units }
    secondaryCurrency { code name units }
    lastTrade { price }
  }
}"#;

const ORDERBOOK_QUERY: &str = r#"query sdk_marketOrderBook($marketCode: ID!, $limit: Int) {
  marketOrderBook(marketCode: $marketCode, limit: $limit) {
    sell { amount limitPrice }
    buy { amount limitPrice }
    spread
    mid
  }
}"#;

pub struct Markets<'a, T: Transport = HttpTransport> {
    api: &'a RequestExecutor<T>,
}

impl<'a, T: Transport> Markets<'a, T> {
    pub fn new(api: &'a RequestExecutor<T>) -> Self {
        Self { api }
    }

    pub async fn get_market(&self, market_code: &str) -> Result<Option<Value>> {
        require_non_empty(market_code, "Market code")?;

        debug!("Fetching market data for: {}", market_code);
        let data = self
            .api
            .call(MARKET_QUERY, json!({ "code": market_code }))
            .await?;

        let market = take_field(data, "market");
        if market.is_some() {
            info!("Market {} data retrieved successfully", market_code);
        }
        Ok(market)
    }

    pub async fn get_markets(&self) -> Result<Option<Value>> {
        debug!("Fetching all markets");
        let data = self.api.call(MARKETS_QUERY, json!({})).await?;

        let markets = take_field(data, "markets");
        if let Some(markets) = &markets {
            info!("All markets retrieved: {} markets", count_at(markets, ""));
        }
        Ok(markets)
    }

    /// Order book with at most `limit` levels per side
    pub async fn get_orderbook(&self, market_code: &str, limit: u32) -> Result<Option<Value>> {
        require_non_empty(market_code, "Market code")?;
        if limit == 0 {
            return Err(OrionxError::Validation("Limit must be positive".to_string()));
        }

        debug!("Fetching orderbook for {} (limit: {})", market_code, limit);
        let data = self
            .api
            .call(
                ORDERBOOK_QUERY,
                json!({ "marketCode": market_code, "limit": limit }),
            )
            .await?;

        let orderbook = take_field(data, "marketOrderBook");
        if let Some(book) = &orderbook {
            info!(
                "Orderbook for {} retrieved - Buy orders: {}, Sell orders: {}",
                market_code,
                count_at(book, "/buy"),
                count_at(book, "/sell")
            );
        }
        Ok(orderbook)
    }

    /// Market info combined with the top of its order book
    pub async fn get_market_stats(&self, market_code: &str) -> Result<Option<MarketStats>> {
        let market = self.get_market(market_code).await?;
        let orderbook = self.get_orderbook(market_code, 1).await?;

        Ok(match (market, orderbook) {
            (Some(market), Some(orderbook)) => Some(MarketStats::from_parts(&market, &orderbook)),
            _ => None,
        })
    }
}
