//! Current user profile

use serde_json::{json, Value};
use tracing::{debug, info};

use super::take_field;
use crate::api::{HttpTransport, RequestExecutor, Transport};
use crate::error::Result;

const ME_QUERY: &str = r#"query sdk_getMe {
  me {
    _id
    email
    name
    profile {
      fullName
      phone
      kycVerified
      birthdate
      countryCode
      occupation
      address
    }
  }
}"#;

const USER_ID_QUERY: &str = r#"query sdk_getUserId {
  me {
    _id
  }
}"#;

pub struct User<'a, T: Transport = HttpTransport> {
    api: &'a RequestExecutor<T>,
}

impl<'a, T: Transport> User<'a, T> {
    pub fn new(api: &'a RequestExecutor<T>) -> Self {
        Self { api }
    }

    /// Profile of the account owning the API key
    pub async fn me(&self) -> Result<Option<Value>> {
        debug!("Fetching user profile");
        let data = self.api.call(ME_QUERY, json!({})).await?;

        let me = take_field(data, "me");
        if me.is_some() {
            info!("User profile retrieved successfully");
        }
        Ok(me)
    }

    pub async fn user_id(&self) -> Result<Option<String>> {
        debug!("Fetching user ID");
        let data = self.api.call(USER_ID_QUERY, json!({})).await?;

        Ok(take_field(data, "me")
            .and_then(|me| me.get("_id").and_then(Value::as_str).map(str::to_string)))
    }
}
