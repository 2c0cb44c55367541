//! Typed views over the OrionX GraphQL schema
//!
//! Each view borrows the [`RequestExecutor`](crate::api::RequestExecutor),
//! validates its inputs, sends a fixed document and digs the result field
//! out of the `data` mapping. Absent or null fields come back as `None`.

pub mod accounts;
pub mod markets;
pub mod orders;
pub mod transactions;
pub mod user;

pub use accounts::Accounts;
pub use markets::Markets;
pub use orders::Orders;
pub use transactions::Transactions;
pub use user::User;

use serde::Serialize;
use serde_json::Value;

use crate::api::GraphQLData;
use crate::error::Result;

/// Remove a top-level field from the data mapping, treating null as absent
pub(crate) fn take_field(mut data: GraphQLData, field: &str) -> Option<Value> {
    data.remove(field).filter(|v| !v.is_null())
}

/// `_id` of a returned object, empty when missing
pub(crate) fn id_of(value: &Value) -> &str {
    value.get("_id").and_then(Value::as_str).unwrap_or_default()
}

/// Length of an array found at `pointer`, 0 when missing
pub(crate) fn count_at(value: &Value, pointer: &str) -> usize {
    value
        .pointer(pointer)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

pub(crate) fn to_variables<P: Serialize>(params: &P) -> Result<Value> {
    Ok(serde_json::to_value(params)?)
}
