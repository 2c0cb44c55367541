//! Request parameters and typed summaries for the OrionX endpoints
//!
//! Parameter structs serialize straight into GraphQL variables (camelCase
//! keys). Each one validates itself before anything is sent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{OrionxError, Result};

pub(crate) fn require_non_empty(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        return Err(OrionxError::Validation(format!("{} cannot be empty", what)));
    }
    Ok(())
}

pub(crate) fn require_positive(value: u64, what: &str) -> Result<()> {
    if value == 0 {
        return Err(OrionxError::Validation(format!("{} must be positive", what)));
    }
    Ok(())
}

/// Sort direction for paginated listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortType {
    Asc,
    Desc,
}

/// Filters for `orders(...)`; unset fields are omitted from the variables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_closed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_filled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_type: Option<SortType>,
}

impl OrderFilter {
    /// Open orders for one market
    pub fn open(market_code: impl Into<String>) -> Self {
        Self {
            market_code: Some(market_code.into()),
            only_open: Some(true),
            ..Default::default()
        }
    }
}

/// Limit order parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitOrder {
    pub market_code: String,
    pub amount: u64,
    pub limit_price: u64,
    pub sell: bool,
    pub client_id: Option<String>,
}

impl LimitOrder {
    pub fn buy(market_code: impl Into<String>, amount: u64, limit_price: u64) -> Self {
        Self {
            market_code: market_code.into(),
            amount,
            limit_price,
            sell: false,
            client_id: None,
        }
    }

    pub fn sell(market_code: impl Into<String>, amount: u64, limit_price: u64) -> Self {
        Self {
            sell: true,
            ..Self::buy(market_code, amount, limit_price)
        }
    }

    pub fn with_client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_non_empty(&self.market_code, "Market code")?;
        require_positive(self.amount, "Amount")?;
        require_positive(self.limit_price, "Limit price")
    }
}

/// Market order parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOrder {
    pub market_code: String,
    pub amount: u64,
    pub sell: bool,
    pub client_id: Option<String>,
}

impl MarketOrder {
    pub fn buy(market_code: impl Into<String>, amount: u64) -> Self {
        Self {
            market_code: market_code.into(),
            amount,
            sell: false,
            client_id: None,
        }
    }

    pub fn sell(market_code: impl Into<String>, amount: u64) -> Self {
        Self {
            sell: true,
            ..Self::buy(market_code, amount)
        }
    }

    pub fn with_client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_non_empty(&self.market_code, "Market code")?;
        require_positive(self.amount, "Amount")
    }
}

fn require_stop_price(up: Option<u64>, down: Option<u64>) -> Result<()> {
    if up.is_none() && down.is_none() {
        return Err(OrionxError::Validation(
            "At least one stop price must be provided".to_string(),
        ));
    }
    Ok(())
}

/// Stop-limit order parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopLimitOrder {
    pub market_code: String,
    pub stop_price_up: Option<u64>,
    pub stop_price_down: Option<u64>,
    pub amount: u64,
    pub limit_price: u64,
    pub sell: bool,
    pub client_id: Option<String>,
}

impl StopLimitOrder {
    pub fn validate(&self) -> Result<()> {
        require_non_empty(&self.market_code, "Market code")?;
        require_positive(self.amount, "Amount")?;
        require_positive(self.limit_price, "Limit price")?;
        require_stop_price(self.stop_price_up, self.stop_price_down)
    }
}

/// Stop-market order parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopMarketOrder {
    pub market_code: String,
    pub stop_price_up: Option<u64>,
    pub stop_price_down: Option<u64>,
    pub amount: u64,
    pub sell: bool,
    pub client_id: Option<String>,
}

impl StopMarketOrder {
    pub fn validate(&self) -> Result<()> {
        require_non_empty(&self.market_code, "Market code")?;
        require_positive(self.amount, "Amount")?;
        require_stop_price(self.stop_price_up, self.stop_price_down)
    }
}

/// Filters for `transactions(...)`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    /// ISO date, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_type: Option<SortType>,
}

/// Crypto transfer out of a wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCrypto {
    pub from_wallet_id: String,
    pub contact_id: Option<String>,
    pub network: String,
    pub amount: u64,
    pub description: Option<String>,
    pub client_id: Option<String>,
}

impl SendCrypto {
    pub fn validate(&self) -> Result<()> {
        require_non_empty(&self.from_wallet_id, "Wallet ID")?;
        require_non_empty(&self.network, "Network")?;
        require_positive(self.amount, "Amount")
    }
}

/// Fiat withdrawal to a registered bank account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRequest {
    pub wallet_id: String,
    pub account_id: String,
    pub amount: u64,
}

impl WithdrawalRequest {
    pub fn validate(&self) -> Result<()> {
        require_non_empty(&self.wallet_id, "Wallet ID")?;
        require_non_empty(&self.account_id, "Account ID")?;
        require_positive(self.amount, "Amount")
    }
}

/// Instant conversion against a quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    pub quote_option_id: String,
    pub amount: u64,
    pub market_code: String,
    pub sell: bool,
}

impl Conversion {
    pub fn validate(&self) -> Result<()> {
        require_non_empty(&self.quote_option_id, "Quote option ID")?;
        require_positive(self.amount, "Amount")?;
        require_non_empty(&self.market_code, "Market code")
    }
}

/// Balance summary of one wallet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub currency: Option<String>,
    pub balance: Option<i64>,
    pub available_balance: Option<i64>,
    pub balance_usd: Option<f64>,
    pub balance_clp: Option<f64>,
    pub wallet_id: Option<String>,
}

impl Balance {
    /// Build from a `wallet` object as returned by the API
    pub fn from_wallet(wallet: &Value) -> Self {
        Self {
            currency: str_at(wallet, &["currency", "code"]),
            balance: wallet.get("balance").and_then(Value::as_i64),
            available_balance: wallet.get("availableBalance").and_then(Value::as_i64),
            balance_usd: wallet.get("balanceUSD").and_then(Value::as_f64),
            balance_clp: wallet.get("balanceCLP").and_then(Value::as_f64),
            wallet_id: str_at(wallet, &["_id"]),
        }
    }
}

/// Market snapshot combining market info and the top of the order book
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketStats {
    pub code: Option<String>,
    pub name: Option<String>,
    pub last_price: Option<f64>,
    pub spread: Option<f64>,
    pub mid_price: Option<f64>,
    pub best_bid: Option<f64>,
    pub best_ask: Option<f64>,
    pub main_currency: Option<String>,
    pub secondary_currency: Option<String>,
}

impl MarketStats {
    pub fn from_parts(market: &Value, orderbook: &Value) -> Self {
        Self {
            code: str_at(market, &["code"]),
            name: str_at(market, &["name"]),
            last_price: market.pointer("/lastTrade/price").and_then(Value::as_f64),
            spread: orderbook.get("spread").and_then(Value::as_f64),
            mid_price: orderbook.get("mid").and_then(Value::as_f64),
            best_bid: orderbook.pointer("/buy/0/limitPrice").and_then(Value::as_f64),
            best_ask: orderbook.pointer("/sell/0/limitPrice").and_then(Value::as_f64),
            main_currency: str_at(market, &["mainCurrency", "code"]),
            secondary_currency: str_at(market, &["secondaryCurrency", "code"]),
        }
    }
}

fn str_at(value: &Value, path: &[&str]) -> Option<String> {
    path.iter()
        .try_fold(value, |v, key| v.get(*key))
        .and_then(Value::as_str)
        .map(str::to_string)
}
