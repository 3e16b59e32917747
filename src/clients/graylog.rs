//! Graylog REST API client.
//!
//! Every call authenticates as the `admin` account with HTTP Basic Auth and
//! exchanges JSON. Failures are never retried here.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::GraylogConfig;
use crate::constants::api;
use crate::error::{GraylogError, Result};
use crate::models::user::User;

/// Placeholder for calls that send no request body.
pub const NO_BODY: Option<&()> = None;

#[derive(Clone)]
pub struct GraylogClient {
    client: Client,
    base_url: String,
    password: String,
    email_domain: String,
}

impl std::fmt::Debug for GraylogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraylogClient")
            .field("base_url", &self.base_url)
            .field("email_domain", &self.email_domain)
            .finish_non_exhaustive()
    }
}

impl GraylogClient {
    pub fn new(config: &GraylogConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            "graylog-configurer/",
            env!("CARGO_PKG_VERSION")
        ));

        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build().map_err(GraylogError::Transport)?,
            base_url: config.api_url.clone(),
            password: config.password.clone(),
            email_domain: config.email_domain.clone(),
        })
    }

    /// Client against `base_url` with every other setting at its default.
    pub fn with_url(base_url: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let config = GraylogConfig {
            api_url: base_url.into(),
            password: password.into(),
            ..Default::default()
        };
        Self::new(&config)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn email_domain(&self) -> &str {
        &self.email_domain
    }

    /// Performs one authenticated call and ignores the response body.
    ///
    /// `path` is appended to the base URL as given, so it needs its own
    /// leading slash.
    pub async fn call_api<I>(&self, method: &str, path: &str, input: Option<&I>) -> Result<()>
    where
        I: Serialize + ?Sized,
    {
        // Dropping the response hands the connection back to the pool.
        self.send(method, path, input).await.map(drop)
    }

    /// Performs one authenticated call and decodes the JSON response body.
    pub async fn call_api_json<I, O>(
        &self,
        method: &str,
        path: &str,
        input: Option<&I>,
    ) -> Result<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let response = self.send(method, path, input).await?;
        let body = response.bytes().await.map_err(GraylogError::Transport)?;

        serde_json::from_slice(&body).map_err(GraylogError::Decode)
    }

    /// Liveness probe: a cheap authenticated read of the users collection.
    pub async fn api_reachable(&self) -> Result<()> {
        self.call_api("GET", api::USERS_PATH, NO_BODY).await
    }

    async fn send<I>(&self, method: &str, path: &str, input: Option<&I>) -> Result<Response>
    where
        I: Serialize + ?Sized,
    {
        let body = match input {
            Some(value) => serde_json::to_vec(value).map_err(GraylogError::Encode)?,
            None => Vec::new(),
        };

        let method = Method::from_bytes(method.as_bytes()).map_err(GraylogError::request_build)?;
        let full_url = format!("{}{}", self.base_url, path);
        let url = Url::parse(&full_url).map_err(GraylogError::request_build)?;

        debug!(method = %method, url = %full_url, "Calling Graylog API");

        let response = self
            .client
            .request(method.clone(), url)
            .basic_auth(api::USERNAME, Some(&self.password))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(api::REQUESTED_BY_HEADER, api::REQUESTED_BY)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    GraylogError::request_build(e)
                } else {
                    GraylogError::Transport(e)
                }
            })?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(GraylogError::Api {
                status,
                method,
                url: full_url,
            });
        }

        Ok(response)
    }
}

/// User endpoints.
impl GraylogClient {
    pub async fn get_user(&self, name: &str) -> Result<User> {
        self.call_api_json("GET", &user_path(name), NO_BODY).await
    }

    /// Creates `name` with the Admin role and a random password.
    ///
    /// Returns the record that was sent, not the server's view of it.
    pub async fn create_user(&self, name: &str) -> Result<User> {
        let user = User::new_admin(name, &self.email_domain)?;

        self.call_api("POST", api::USERS_PATH, Some(&user)).await?;
        Ok(user)
    }

    /// Replaces the whole record stored under `user.username`.
    pub async fn edit_user(&self, user: &User) -> Result<()> {
        self.call_api("PUT", &user_path(&user.username), Some(user)).await
    }

    pub async fn delete_user(&self, name: &str) -> Result<()> {
        self.call_api("DELETE", &user_path(name), NO_BODY).await
    }
}

fn user_path(name: &str) -> String {
    format!("{}/{name}", api::USERS_PATH)
}
