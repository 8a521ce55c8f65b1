//! Order API client implementation.
//!
//! Fetches off-chain order records from the REST backend and normalizes
//! them for display. The caller's wallet address travels in the `Account`
//! header; the backend treats it as the trust boundary, nothing is
//! verified client-side.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Deserialize};
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use super::config::ClientConfig;
use super::error::ClientError;
use crate::types::{summarize_earnings, Earnings, Order, OrderStatus, RawOrder};

/// Header carrying the caller's wallet address.
const ACCOUNT_HEADER: &str = "Account";

/// Filter for order list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderFilter {
    /// Restrict results to a single status; `None` means all statuses.
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    /// Builds a filter from a UI filter value (`"all"` or a status code).
    ///
    /// # Errors
    ///
    /// Returns an error for a value that is neither `"all"` nor a known
    /// status code.
    pub fn from_status_value(value: &str) -> Result<Self, ClientError> {
        if value == "all" {
            return Ok(Self { status: None });
        }
        let code: u8 = value
            .parse()
            .map_err(|_| ClientError::Decode(format!("invalid status filter: {:?}", value)))?;
        let status = OrderStatus::try_from(code)?;
        Ok(Self {
            status: Some(status),
        })
    }
}

/// A page of normalized orders.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPage {
    /// Orders on this page.
    pub orders: Vec<Order>,

    /// Total number of matching orders across all pages.
    pub total: u64,
}

/// Raw list response from the order API.
#[derive(Debug, Deserialize)]
struct OrderListResponse {
    #[serde(rename = "List", default)]
    list: Vec<RawOrder>,
    #[serde(rename = "Total", default)]
    total: u64,
}

/// HTTP client for the order API.
#[derive(Debug, Clone)]
pub struct OrderApiClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl OrderApiClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .user_agent(&config.user_agent)
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self { config, http })
    }

    /// Creates a new client with the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::new(ClientConfig::new(base_url))
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches one page of the caller's orders, normalized for display.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a record cannot be
    /// normalized.
    pub async fn get_order_list(
        &self,
        page: u32,
        page_size: u32,
        filter: OrderFilter,
        account: &Pubkey,
    ) -> Result<OrderPage, ClientError> {
        let body = list_request_body(page, page_size, filter);
        let response: OrderListResponse = self.post_as("/order/mine", &body, account).await?;

        let mut orders = Vec::with_capacity(response.list.len());
        for raw in &response.list {
            orders.push(Order::from_raw(raw)?);
        }
        Ok(OrderPage {
            orders,
            total: response.total,
        })
    }

    /// Fetches a single order by id, normalized for display.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the order does not exist, or
    /// the record cannot be normalized.
    pub async fn get_order_detail(&self, id: &str) -> Result<Order, ClientError> {
        let raw: RawOrder = self.get_as(&format!("/order/{}", id)).await?;
        Ok(Order::from_raw(&raw)?)
    }

    /// Sums the caller's earnings into pending and received buckets.
    ///
    /// Fetches a single page of `total` records and aggregates the raw
    /// lamport totals by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_total_earnings(
        &self,
        total: u32,
        account: &Pubkey,
    ) -> Result<Earnings, ClientError> {
        let body = list_request_body(1, total, OrderFilter::default());
        let response: OrderListResponse = self.post_as("/order/mine", &body, account).await?;
        Ok(summarize_earnings(&response.list))
    }

    async fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!(%url, "order api GET");
        self.request_with_retry(|| self.http.get(&url)).await
    }

    async fn post_as<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
        account: &Pubkey,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.config.base_url, path);
        let account = account.to_string();
        debug!(%url, %account, "order api POST");
        self.request_with_retry(|| {
            self.http
                .post(&url)
                .header(ACCOUNT_HEADER, &account)
                .json(body)
        })
        .await
    }

    /// Makes a request with retry logic for timeouts and rate limits.
    async fn request_with_retry<T, F>(&self, request_fn: F) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut last_error = None;
        let mut retry_count = 0;

        while retry_count <= self.config.max_retries {
            let response = request_fn().send().await;

            match response {
                Ok(resp) => {
                    let status = resp.status();

                    if status.is_success() {
                        let body = resp
                            .text()
                            .await
                            .map_err(|e| ClientError::Decode(e.to_string()))?;

                        return serde_json::from_str(&body)
                            .map_err(|e| ClientError::Decode(e.to_string()));
                    }

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = resp
                            .headers()
                            .get("Retry-After")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|s| s.parse().ok());

                        if retry_count < self.config.max_retries {
                            let wait_time = retry_after.unwrap_or(1);
                            tokio::time::sleep(Duration::from_secs(wait_time)).await;
                            retry_count += 1;
                            continue;
                        }

                        return Err(ClientError::RateLimited { retry_after });
                    }

                    if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(ClientError::NotFound("order".to_string()));
                    }

                    if status == reqwest::StatusCode::UNAUTHORIZED {
                        return Err(ClientError::Unauthorized);
                    }

                    let body = resp.text().await.unwrap_or_default();
                    return Err(ClientError::Api {
                        status: status.as_u16(),
                        message: body,
                    });
                }
                Err(e) => {
                    if e.is_timeout() && retry_count < self.config.max_retries {
                        retry_count += 1;
                        tokio::time::sleep(Duration::from_millis(100 * (1 << retry_count))).await;
                        last_error = Some(ClientError::from(e));
                        continue;
                    }
                    return Err(ClientError::from(e));
                }
            }
        }

        Err(last_error.unwrap_or(ClientError::Timeout))
    }
}

/// Builds the list request body; a `None` status filter (the UI's `"all"`)
/// is omitted from the body entirely.
fn list_request_body(page: u32, page_size: u32, filter: OrderFilter) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    body.insert("Page".to_string(), serde_json::json!(page));
    body.insert("PageSize".to_string(), serde_json::json!(page_size));
    if let Some(status) = filter.status {
        body.insert("Status".to_string(), serde_json::json!(u8::from(status)));
    }
    serde_json::Value::Object(body)
}
