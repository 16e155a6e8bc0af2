pub mod asaas;

use crate::models::asaas::{ChargeRequest, CustomerRequest};
use async_trait::async_trait;

/// Billing provider seam. Both calls return the raw response body, deciding
/// whether the provider accepted the request is up to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BillingProvider: Send + Sync {
    async fn create_customer(
        &self,
        api_key: &str,
        request: &CustomerRequest,
    ) -> anyhow::Result<String>;

    async fn create_charge(
        &self,
        api_key: &str,
        request: &ChargeRequest,
    ) -> anyhow::Result<String>;
}

pub type ImplBillingProvider = Box<dyn BillingProvider>;
