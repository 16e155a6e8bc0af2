//! # Asaas API client
//!
//! Sends customer and charge creation requests to the Asaas v3 API.

use anyhow::Context;
use async_trait::async_trait;
use lambda_runtime::tracing;
use serde::Serialize;

use crate::{
    config, consts,
    models::asaas::{ChargeRequest, CustomerRequest},
    utils,
};

#[derive(Clone)]
pub struct AsaasClient {
    /// HTTP client for making API requests
    client: reqwest::Client,
    /// `/customers` endpoint
    customers_endpoint: String,
    /// `/payments` endpoint
    payments_endpoint: String,
}

impl AsaasClient {
    pub fn new(app_config: &config::AppConfig) -> Self {
        Self {
            client: utils::REQUEST_CLIENT.clone(),
            customers_endpoint: app_config.customers_endpoint(),
            payments_endpoint: app_config.payments_endpoint(),
        }
    }

    /// Posts `payload` and returns the response body whatever the status code is,
    /// error bodies are part of the provider contract.
    async fn post_json<T: Serialize + Sync>(
        &self,
        endpoint: &str,
        api_key: &str,
        payload: &T,
    ) -> anyhow::Result<String> {
        let response = self
            .client
            .post(endpoint)
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .header("user-agent", consts::USER_AGENT)
            .header(consts::ASAAS_AUTH_HEADER, api_key)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("failed to send request to {endpoint}"))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{endpoint} answered with status {status}");
        }

        response
            .text()
            .await
            .with_context(|| format!("failed to read response body from {endpoint}"))
    }
}

#[async_trait]
impl crate::services::BillingProvider for AsaasClient {
    async fn create_customer(
        &self,
        api_key: &str,
        request: &CustomerRequest,
    ) -> anyhow::Result<String> {
        self.post_json(&self.customers_endpoint, api_key, request).await
    }

    async fn create_charge(
        &self,
        api_key: &str,
        request: &ChargeRequest,
    ) -> anyhow::Result<String> {
        self.post_json(&self.payments_endpoint, api_key, request).await
    }
}
