//! Wallets and balances

use serde_json::{json, Value};
use tracing::{debug, info};

use super::take_field;
use crate::api::{HttpTransport, RequestExecutor, Transport};
use crate::error::Result;
use crate::types::{require_non_empty, Balance};

const ACCOUNT_QUERY: &str = r#"query sdk_getAccount($assetId: ID!) {
  wallet(code: $assetId) {
    _id
    currency { code units }
    balance
    availableBalance
    availableNetworks { code }
    balanceUSD
    balanceCLP
  }
}"#;

const ACCOUNTS_QUERY: &str = r#"query sdk_getAccounts {
  me {
    wallets {
      _id
      currency { code units }
      balance
      availableBalance
      availableNetworks { code }
      balanceUSD
      balanceCLP
    }
  }
}"#;

pub struct Accounts<'a, T: Transport = HttpTransport> {
    api: &'a RequestExecutor<T>,
}

impl<'a, T: Transport> Accounts<'a, T> {
    pub fn new(api: &'a RequestExecutor<T>) -> Self {
        Self { api }
    }

    /// Wallet for one currency code
    pub async fn get_account(&self, currency_code: &str) -> Result<Option<Value>> {
        require_non_empty(currency_code, "Currency code")?;

        debug!("Fetching account for currency: {}", currency_code);
        let data = self
            .api
            .call(ACCOUNT_QUERY, json!({ "assetId": currency_code }))
            .await?;

        let wallet = take_field(data, "wallet");
        if wallet.is_some() {
            info!("Account for {} retrieved successfully", currency_code);
        }
        Ok(wallet)
    }

    /// Every wallet of the current user
    pub async fn get_accounts(&self) -> Result<Option<Vec<Value>>> {
        debug!("Fetching all accounts");
        let data = self.api.call(ACCOUNTS_QUERY, json!({})).await?;

        let wallets = take_field(data, "me")
            .and_then(|mut me| me.get_mut("wallets").map(Value::take))
            .and_then(|wallets| match wallets {
                Value::Array(items) => Some(items),
                _ => None,
            });
        if let Some(wallets) = &wallets {
            info!("All accounts retrieved: {} accounts", wallets.len());
        }
        Ok(wallets)
    }

    pub async fn get_balance(&self, currency_code: &str) -> Result<Option<Balance>> {
        Ok(self
            .get_account(currency_code)
            .await?
            .map(|wallet| Balance::from_wallet(&wallet)))
    }

    /// Balances of all wallets, empty when the user has none
    pub async fn get_balances(&self) -> Result<Vec<Balance>> {
        let wallets = self.get_accounts().await?.unwrap_or_default();
        Ok(wallets.iter().map(Balance::from_wallet).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::testing::executor;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_get_account_requires_code() {
        let api = executor(vec![]);
        let err = Accounts::new(&api).get_account("").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "Currency code cannot be empty");
    }

    #[tokio::test]
    async fn test_get_balance() {
        let api = executor(vec![
            json!({"data": {"wallet": {
                "_id": "w1",
                "currency": {"code": "BTC", "units": 8},
                "balance": 200,
                "availableBalance": 150
            }}}),
            json!({"data": {"wallet": null}}),
        ]);
        let accounts = Accounts::new(&api);

        let balance = accounts.get_balance("BTC").await.unwrap().unwrap();
        assert_eq!(balance.currency.as_deref(), Some("BTC"));
        assert_eq!(balance.available_balance, Some(150));
        assert_eq!(api.transport().sent()[0]["variables"], json!({"assetId": "BTC"}));

        assert_eq!(accounts.get_balance("XYZ").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_balances() {
        let api = executor(vec![
            json!({"data": {"me": {"wallets": [
                {"_id": "w1", "currency": {"code": "BTC"}, "balance": 1},
                {"_id": "w2", "currency": {"code": "CLP"}, "balance": 2}
            ]}}}),
            json!({"data": {"me": null}}),
        ]);
        let accounts = Accounts::new(&api);

        let balances = accounts.get_balances().await.unwrap();
        assert_eq!(balances.len(), 2);
        assert_eq!(balances[1].wallet_id.as_deref(), Some("w2"));

        assert!(accounts.get_balances().await.unwrap().is_empty());
    }
}
