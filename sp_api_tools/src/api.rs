use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::*;
use ow_common::Secret;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{
    config::SpApiConfig,
    data_objects::{AccessTokenResponse, OrderItemsList, OrdersList, SpResponse},
    helpers::sp_api_timestamp,
    SpApiError,
    SpOrder,
    SpOrderItem,
};

/// Access tokens are refreshed this long before Amazon says they expire.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Clone)]
struct AccessToken {
    token: Secret<String>,
    expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SpApi {
    config: SpApiConfig,
    client: Arc<Client>,
    token: Arc<Mutex<Option<AccessToken>>>,
}

impl SpApi {
    pub fn new(config: SpApiConfig) -> Result<Self, SpApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert("User-Agent", HeaderValue::from_static(concat!("order-watch/", env!("CARGO_PKG_VERSION"))));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| SpApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client), token: Arc::new(Mutex::new(None)) })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.endpoint.trim_end_matches('/'))
    }

    /// Returns a valid LWA access token, refreshing it if the cached one is missing or about to expire.
    async fn access_token(&self) -> Result<Secret<String>, SpApiError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Utc::now() {
                return Ok(token.token.clone());
            }
            debug!("🔑️ LWA access token has expired. Refreshing.");
        }
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", self.config.refresh_token.reveal().as_str()),
            ("client_id", self.config.lwa_client_id.as_str()),
            ("client_secret", self.config.lwa_client_secret.reveal().as_str()),
        ];
        trace!("🔑️ Requesting LWA access token from {}", self.config.token_url);
        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| SpApiError::AuthError(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SpApiError::AuthError(format!("Status {status}. {message}")));
        }
        let token =
            response.json::<AccessTokenResponse>().await.map_err(|e| SpApiError::JsonError(e.to_string()))?;
        let expires_at = Utc::now() + Duration::seconds(token.expires_in - TOKEN_EXPIRY_MARGIN_SECS);
        debug!("🔑️ New LWA access token obtained. Valid until {expires_at}");
        let token = AccessToken { token: Secret::new(token.access_token), expires_at };
        let result = token.token.clone();
        *cached = Some(token);
        Ok(result)
    }

    pub async fn rest_query<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, SpApiError> {
        let url = self.url(path);
        let token = self.access_token().await?;
        trace!("Sending REST query: {url}");
        let mut req = self.client.request(method, url).header("x-amz-access-token", token.reveal().as_str());
        if !params.is_empty() {
            req = req.query(params);
        }
        let response = req.send().await.map_err(|e| SpApiError::RestRequestError(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| SpApiError::RestResponseError(e.to_string()))?;
        let envelope = serde_json::from_str::<SpResponse<T>>(&body);
        if status.is_success() {
            trace!("REST query successful. {status}");
            let envelope = envelope.map_err(|e| SpApiError::JsonError(e.to_string()))?;
            envelope.payload.ok_or(SpApiError::EmptyResponse)
        } else {
            let message = match envelope {
                Ok(e) if !e.errors.is_empty() => {
                    e.errors.iter().map(|e| e.describe()).collect::<Vec<String>>().join(", ")
                },
                _ => body,
            };
            Err(SpApiError::QueryError { status: status.as_u16(), message })
        }
    }

    /// Fetches every order in the given marketplaces that was updated after `last_updated_after`, following
    /// `NextToken` until all pages have been retrieved.
    pub async fn list_orders(
        &self,
        marketplace_ids: &[&str],
        last_updated_after: DateTime<Utc>,
    ) -> Result<Vec<SpOrder>, SpApiError> {
        let marketplaces = marketplace_ids.join(",");
        let updated_after = sp_api_timestamp(&last_updated_after);
        let mut orders = vec![];
        let mut next_token: Option<String> = None;
        loop {
            let mut params = vec![("MarketplaceIds", marketplaces.as_str())];
            match next_token.as_deref() {
                Some(token) => params.push(("NextToken", token)),
                None => params.push(("LastUpdatedAfter", updated_after.as_str())),
            }
            let page = self.rest_query::<OrdersList>(Method::GET, "/orders/v0/orders", &params).await?;
            debug!("Fetched {} orders. More pages: {}", page.orders.len(), page.next_token.is_some());
            orders.extend(page.orders);
            match page.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }
        info!("Fetched {} orders updated after {updated_after}", orders.len());
        Ok(orders)
    }

    pub async fn list_order_items(&self, order_id: &str) -> Result<Vec<SpOrderItem>, SpApiError> {
        let path = order_items_path(order_id);
        let mut items = vec![];
        let mut next_token: Option<String> = None;
        debug!("Fetching items for order {order_id}");
        loop {
            let params = match next_token.as_deref() {
                Some(token) => vec![("NextToken", token)],
                None => vec![],
            };
            let page = self.rest_query::<OrderItemsList>(Method::GET, &path, &params).await?;
            items.extend(page.order_items);
            match page.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }
        trace!("Fetched {} items for order {order_id}", items.len());
        Ok(items)
    }
}

fn order_items_path(order_id: &str) -> String {
    format!("/orders/v0/orders/{}/orderItems", urlencoding::encode(order_id))
}
