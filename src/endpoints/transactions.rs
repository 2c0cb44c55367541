//! Transaction history, transfers and conversions

use serde_json::{json, Value};
use tracing::{debug, info};

use super::{count_at, id_of, take_field, to_variables};
use crate::api::{HttpTransport, RequestExecutor, Transport};
use crate::error::Result;
use crate::types::{
    require_non_empty, Conversion, SendCrypto, SortType, TransactionFilter, WithdrawalRequest,
};

const TRANSACTION_QUERY: &str = r#"query sdk_getTransaction($_id: ID!) {
  transaction(_id: $_id) {
    _id
    amount
    balance
    commission
    currency { code units }
    date
    type
    adds
    hash
    description
    market {
      code
      mainCurrency { code units }
      secondaryCurrency { code units }
    }
    price
    cost
    explorerURL
    isInside
    meta { status }
  }
}"#;

const TRANSACTIONS_QUERY: &str = r#"query sdk_getTransactions($filter: String, $walletId: ID, $types: [String], $initPeriod: Date, $finalPeriod: Date, $page: Int, $limit: Int, $sortBy: String, $sortType: SortType) {
  transactions(filter: $filter, walletId: $walletId, types: $types, initPeriod: $initPeriod, finalPeriod: $finalPeriod, page: $page, limit: $limit, sortBy: $sortBy, sortType: $sortType) {
    _id
    items {
      amount
      balance
      commission
      currency { code units }
      date
      type
      adds
      hash
      description
      market {
        code
        mainCurrency { code units }
        secondaryCurrency { code units }
      }
      price
      cost
      explorerURL
      isInside
      meta { status }
    }
  }
}"#;

const SEND_CRYPTO: &str = r#"mutation sdk_send($fromWalletId: ID!, $contactId: ID, $network: String!, $amount: BigInt!, $description: String, $clientId: ID) {
  sendCrypto(fromWalletId: $fromWalletId, contactId: $contactId, network: $network, amount: $amount, description: $description, clientId: $clientId) {
    _id
    type
    amount
    price
    hash
    date
    market { code }
    meta { status }
  }
}"#;

const WITHDRAWAL_REQUEST: &str = r#"mutation sdk_withdrawalRequest($walletId: ID, $accountId: ID, $amount: BigInt) {
  requestWithdrawal(walletId: $walletId, accountId: $accountId, amount: $amount) {
    _id
    amount
    commission
    date
    type
    description
  }
}"#;

const CONVERT: &str = r#"mutation sdk_convert($quoteOptionId: String, $amount: BigInt!, $marketCode: String!, $sell: Boolean!) {
  instantTransaction(quoteOptionId: $quoteOptionId, amount: $amount, marketCode: $marketCode, sell: $sell)
}"#;

const WALLET_ID_QUERY: &str = r#"query sdk_getAccount($assetId: ID!) {
  wallet(code: $assetId) {
    _id
  }
}"#;

pub struct Transactions<'a, T: Transport = HttpTransport> {
    api: &'a RequestExecutor<T>,
}

impl<'a, T: Transport> Transactions<'a, T> {
    pub fn new(api: &'a RequestExecutor<T>) -> Self {
        Self { api }
    }

    pub async fn get_transaction(&self, transaction_id: &str) -> Result<Option<Value>> {
        require_non_empty(transaction_id, "Transaction ID")?;

        debug!("Fetching transaction: {}", transaction_id);
        let data = self
            .api
            .call(TRANSACTION_QUERY, json!({ "_id": transaction_id }))
            .await?;

        let transaction = take_field(data, "transaction");
        if transaction.is_some() {
            info!("Transaction {} retrieved successfully", transaction_id);
        }
        Ok(transaction)
    }

    pub async fn get_transactions(&self, filter: &TransactionFilter) -> Result<Option<Value>> {
        debug!("Fetching transactions with filters: {:?}", filter);
        let data = self
            .api
            .call(TRANSACTIONS_QUERY, to_variables(filter)?)
            .await?;

        let transactions = take_field(data, "transactions");
        if let Some(page) = &transactions {
            info!("Transactions retrieved: {} transactions", count_at(page, "/items"));
        }
        Ok(transactions)
    }

    pub async fn send_crypto(&self, transfer: &SendCrypto) -> Result<Option<Value>> {
        transfer.validate()?;

        let variables = to_variables(transfer)?;
        debug!("Sending crypto: {}", variables);
        let data = self.api.call(SEND_CRYPTO, variables).await?;

        let sent = take_field(data, "sendCrypto");
        if let Some(tx) = &sent {
            let id = id_of(tx);
            info!("Crypto send initiated successfully: {}", id);
        }
        Ok(sent)
    }

    pub async fn withdrawal_request(&self, request: &WithdrawalRequest) -> Result<Option<Value>> {
        request.validate()?;

        let variables = to_variables(request)?;
        debug!("Requesting withdrawal: {}", variables);
        let data = self.api.call(WITHDRAWAL_REQUEST, variables).await?;

        let withdrawal = take_field(data, "requestWithdrawal");
        if let Some(tx) = &withdrawal {
            let id = id_of(tx);
            info!("Withdrawal request created successfully: {}", id);
        }
        Ok(withdrawal)
    }

    /// Instant trade against a previously quoted option
    pub async fn convert(&self, conversion: &Conversion) -> Result<Option<Value>> {
        conversion.validate()?;

        let variables = to_variables(conversion)?;
        debug!("Converting/trading instantly: {}", variables);
        let data = self.api.call(CONVERT, variables).await?;

        let result = take_field(data, "instantTransaction");
        if result.is_some() {
            info!("Instant conversion completed successfully");
        }
        Ok(result)
    }

    /// Newest-first transactions of the wallet holding `currency_code`.
    ///
    /// Returns `None` when the user has no such wallet.
    pub async fn get_history(
        &self,
        currency_code: &str,
        limit: u32,
        page: u32,
    ) -> Result<Option<Value>> {
        require_non_empty(currency_code, "Currency code")?;

        let data = self
            .api
            .call(WALLET_ID_QUERY, json!({ "assetId": currency_code }))
            .await?;
        let wallet_id = take_field(data, "wallet")
            .and_then(|w| w.get("_id").and_then(Value::as_str).map(str::to_string));

        let Some(wallet_id) = wallet_id else {
            debug!("No wallet found for {}", currency_code);
            return Ok(None);
        };

        let filter = TransactionFilter {
            wallet_id: Some(wallet_id),
            limit: Some(limit),
            page: Some(page),
            sort_type: Some(SortType::Desc),
            ..Default::default()
        };
        self.get_transactions(&filter).await
    }
}
