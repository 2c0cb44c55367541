//! Order queries and placement

use serde_json::{json, Value};
use tracing::{debug, info};

use super::{count_at, id_of, take_field, to_variables};
use crate::api::{HttpTransport, RequestExecutor, Transport};
use crate::error::Result;
use crate::types::{
    require_non_empty, LimitOrder, MarketOrder, OrderFilter, StopLimitOrder, StopMarketOrder,
};

const ORDER_QUERY: &str = r#"query sdk_getOrder($orderId: ID!) {
  order(orderId: $orderId) {
    _id
    type
    amount
    limitPrice
    stopPriceDown
    stopPriceUp
    status
    createdAt
    activatedAt
    closedAt
    market {
      code
      mainCurrency { code units }
      secondaryCurrency { code units }
    }
    clientId
  }
}"#;

const ORDERS_QUERY: &str = r#"query sdk_getOrders($filter: String, $marketCode: ID, $onlyOpen: Boolean, $onlyClosed: Boolean, $currencyCode: ID, $onlyFilled: Boolean, $page: Int, $limit: Int, $sortBy: String, $sortType: SortType) {
  orders(filter: $filter, marketCode: $marketCode, onlyOpen: $onlyOpen, onlyClosed: $onlyClosed, currencyCode: $currencyCode, onlyFilled: $onlyFilled, page: $page, limit: $limit, sortBy: $sortBy, sortType: $sortType) {
    _id
    items {
      type
      amount
      limitPrice
      stopPriceUp
      stopPriceDown
      status
      createdAt
      activatedAt
      closedAt
      market {
        code
        mainCurrency { code units }
        secondaryCurrency { code units }
      }
      clientId
    }
  }
}"#;

const PLACE_LIMIT_ORDER: &str = r#"mutation sdk_placeLimitOrder($marketCode: ID, $amount: BigInt, $limitPrice: BigInt, $sell: Boolean, $clientId: String) {
  placeLimitOrder(marketCode: $marketCode, amount: $amount, limitPrice: $limitPrice, sell: $sell, clientId: $clientId) {
    _id
    type
    amount
    limitPrice
    status
    createdAt
    market { code }
    clientId
  }
}"#;

const PLACE_MARKET_ORDER: &str = r#"mutation sdk_placeMarketOrder($marketCode: ID, $amount: BigInt, $sell: Boolean, $clientId: String) {
  placeMarketOrder(marketCode: $marketCode, amount: $amount, sell: $sell, clientId: $clientId) {
    _id
    type
    amount
    limitPrice
    status
    createdAt
    market { code }
    clientId
  }
}"#;

const PLACE_STOP_LIMIT_ORDER: &str = r#"mutation sdk_placeStopLimitOrder($marketCode: ID, $stopPriceUp: BigInt, $stopPriceDown: BigInt, $amount: BigInt, $limitPrice: BigInt, $sell: Boolean, $clientId: String) {
  placeStopLimitOrder(marketCode: $marketCode, stopPriceUp: $stopPriceUp, stopPriceDown: $stopPriceDown, amount: $amount, limitPrice: $limitPrice, sell: $sell, clientId: $clientId) {
    _id
    type
    amount
    limitPrice
    status
    createdAt
    market { code }
    clientId
  }
}"#;

const PLACE_STOP_MARKET_ORDER: &str = r#"mutation sdk_placeStopMarketOrder($marketCode: ID, $stopPriceUp: BigInt, $stopPriceDown: BigInt, $amount: BigInt, $sell: Boolean, $clientId: String) {
  placeStopMarketOrder(marketCode: $marketCode, stopPriceUp: $stopPriceUp, stopPriceDown: $stopPriceDown, amount: $amount, sell: $sell, clientId: $clientId) {
    _id
    type
    amount
    limitPrice
    status
    createdAt
    market { code }
    clientId
  }
}"#;

const CANCEL_ORDER: &str = r#"mutation sdk_cancelOrder($orderId: ID!) {
  cancelOrder(orderId: $orderId) {
    _id
    type
    status
    clientId
  }
}"#;

pub struct Orders<'a, T: Transport = HttpTransport> {
    api: &'a RequestExecutor<T>,
}

impl<'a, T: Transport> Orders<'a, T> {
    pub fn new(api: &'a RequestExecutor<T>) -> Self {
        Self { api }
    }

    pub async fn get_order(&self, order_id: &str) -> Result<Option<Value>> {
        require_non_empty(order_id, "Order ID")?;

        debug!("Fetching order: {}", order_id);
        let data = self
            .api
            .call(ORDER_QUERY, json!({ "orderId": order_id }))
            .await?;

        let order = take_field(data, "order");
        if order.is_some() {
            info!("Order {} retrieved successfully", order_id);
        }
        Ok(order)
    }

    /// Page of orders; returns the `{_id, items}` connection object
    pub async fn get_orders(&self, filter: &OrderFilter) -> Result<Option<Value>> {
        debug!("Fetching orders with filters: {:?}", filter);
        let data = self.api.call(ORDERS_QUERY, to_variables(filter)?).await?;

        let orders = take_field(data, "orders");
        if let Some(orders) = &orders {
            info!("Orders retrieved: {} orders", count_at(orders, "/items"));
        }
        Ok(orders)
    }

    pub async fn place_limit_order(&self, order: &LimitOrder) -> Result<Option<Value>> {
        order.validate()?;
        self.place(PLACE_LIMIT_ORDER, "placeLimitOrder", "Limit", to_variables(order)?)
            .await
    }

    pub async fn place_market_order(&self, order: &MarketOrder) -> Result<Option<Value>> {
        order.validate()?;
        self.place(PLACE_MARKET_ORDER, "placeMarketOrder", "Market", to_variables(order)?)
            .await
    }

    pub async fn place_stop_limit_order(&self, order: &StopLimitOrder) -> Result<Option<Value>> {
        order.validate()?;
        self.place(
            PLACE_STOP_LIMIT_ORDER,
            "placeStopLimitOrder",
            "Stop limit",
            to_variables(order)?,
        )
        .await
    }

    pub async fn place_stop_market_order(&self, order: &StopMarketOrder) -> Result<Option<Value>> {
        order.validate()?;
        self.place(
            PLACE_STOP_MARKET_ORDER,
            "placeStopMarketOrder",
            "Stop market",
            to_variables(order)?,
        )
        .await
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<Option<Value>> {
        require_non_empty(order_id, "Order ID")?;

        debug!("Cancelling order: {}", order_id);
        let data = self
            .api
            .call(CANCEL_ORDER, json!({ "orderId": order_id }))
            .await?;

        let cancelled = take_field(data, "cancelOrder");
        if cancelled.is_some() {
            info!("Order {} cancelled successfully", order_id);
        }
        Ok(cancelled)
    }

    async fn place(
        &self,
        document: &str,
        field: &str,
        label: &str,
        variables: Value,
    ) -> Result<Option<Value>> {
        debug!("Placing {} order: {}", label.to_lowercase(), variables);
        let data = self.api.call(document, variables).await?;

        let placed = take_field(data, field);
        if let Some(order) = &placed {
            let id = id_of(order);
            info!("{} order placed successfully: {}", label, id);
        }
        Ok(placed)
    }
}
