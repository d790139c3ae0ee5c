//! Whitelisted method calls on `/api/method/{method}`

use reqwest::Method;
use serde_json::Value;

use crate::FrappeClient;
use crate::error::Error;

const GET_LOGGED_USER: &str = "frappe.auth.get_logged_user";
const LOGOUT: &str = "logout";

impl FrappeClient {
    /// Calls a whitelisted server method with a JSON body (POST).
    ///
    /// Returns the `message` field of the response, or the whole body when
    /// the method returns nothing under `message`.
    pub async fn call_method(&self, method: &str, params: &Value) -> Result<Value, Error> {
        let url = self.build_url(&format!("/api/method/{}", method), &[])?;
        let body: Value = self.send_json(Method::POST, url, Some(params)).await?;
        Ok(unwrap_message(body))
    }

    /// Calls a whitelisted server method with query parameters (GET).
    pub async fn get_method(&self, method: &str, params: &[(String, String)]) -> Result<Value, Error> {
        let url = self.build_url(&format!("/api/method/{}", method), params)?;
        let body: Value = self.send_json(Method::GET, url, None).await?;
        Ok(unwrap_message(body))
    }

    /// Returns the id of the user the current credentials belong to.
    pub async fn logged_user(&self) -> Result<String, Error> {
        let value = self.get_method(GET_LOGGED_USER, &[]).await?;
        match value {
            Value::String(user) => Ok(user),
            other => Err(crate::error::ApiError::parse_with_body(
                "get_logged_user did not return a string",
                other.to_string(),
            )
            .into()),
        }
    }

    /// Ends the server-side session.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.build_url(&format!("/api/method/{}", LOGOUT), &[])?;
        let _: Value = self.send_json(Method::POST, url, None).await?;
        log::info!("logged out of {}", self.base_url());
        Ok(())
    }
}

fn unwrap_message(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("message") => {
            map.remove("message").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_unwrap_message() {
        assert_eq!(unwrap_message(json!({"message": "admin@qswr.sa"})), json!("admin@qswr.sa"));
        assert_eq!(unwrap_message(json!({"data": 1})), json!({"data": 1}));
        assert_eq!(unwrap_message(json!([1, 2])), json!([1, 2]));
    }
}
