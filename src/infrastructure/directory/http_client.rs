//! REST-backed user directory

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{DomainError, NewUser, User, UserDirectory, UserId};

/// Error body the directory service sends on rejected requests
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Directory service reached over HTTP
///
/// - `GET <base>` lists users from the `data` field of the body
/// - `POST <base>` creates a user from a JSON body
/// - `DELETE <base>/<id>` removes a user
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    client: Client,
    base_url: Url,
}

impl HttpUserDirectory {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DomainError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            DomainError::configuration(format!("Invalid directory URL '{}': {}", base_url, e))
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(DomainError::configuration(format!(
                "Directory URL must use http or https, got '{}'",
                base_url.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    fn user_url(&self, id: &UserId) -> Result<Url, DomainError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::configuration("Directory URL cannot take a path"))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }
}

fn transport_error(e: reqwest::Error) -> DomainError {
    if e.is_timeout() {
        DomainError::request("Request timed out")
    } else if e.is_connect() {
        DomainError::request(format!("Connection failed: {}", e))
    } else {
        DomainError::request(e.to_string())
    }
}

/// Turn a non-2xx response into a rejection, keeping the service message
async fn ensure_success(response: Response) -> Result<Response, DomainError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .unwrap_or_default()
        .message;

    Err(DomainError::rejected(status.as_u16(), message))
}

/// Pull the user list out of a list response body
///
/// An absent or null `data` field means no users. Entries that do not read
/// as a user are skipped so one bad record does not hide the rest.
fn users_from_body(body: serde_json::Value) -> Result<Vec<User>, DomainError> {
    let entries = match body.get("data") {
        None | Some(serde_json::Value::Null) => return Ok(Vec::new()),
        Some(serde_json::Value::Array(entries)) => entries,
        Some(_) => return Err(DomainError::decode("Malformed user list: data is not an array")),
    };

    let users = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<User>(entry.clone()) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed user entry");
                None
            }
        })
        .collect();

    Ok(users)
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        debug!(url = %self.base_url, "Listing users");

        let response = self
            .client
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(transport_error)?;

        let body: serde_json::Value = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::decode(format!("Failed to parse response: {}", e)))?;

        users_from_body(body)
    }

    async fn create(&self, user: NewUser) -> Result<(), DomainError> {
        debug!(url = %self.base_url, username = %user.username, "Creating user");

        let response = self
            .client
            .post(self.base_url.clone())
            .json(&user)
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await.map(|_| ())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let url = self.user_url(id)?;
        debug!(url = %url, "Deleting user");

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await.map(|_| ())
    }
}
