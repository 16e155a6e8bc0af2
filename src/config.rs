//! Function configuration read from the environment.
//!
//! The configuration is loaded at every invocation instead of at cold start, so a
//! missing `ASAAS_KEY` is reported to the caller as a regular outcome and never
//! crashes the runtime.
//!
//! # Security Notes
//! - `asaas_key` is a secret: it is only handed to the provider client and must
//!   never be logged or echoed back to the caller.

use anyhow::anyhow;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use envconfig::Envconfig;

#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// 🔒 SENSITIVE: Asaas API key, sent in the `access_token` header
    pub asaas_key: Option<String>,

    /// Asaas API base url (NON-SENSITIVE)
    /// Sandbox: "https://sandbox.asaas.com/api/v3"
    #[envconfig(default = "https://www.asaas.com/api/v3")]
    pub asaas_api_url: String,

    /// IANA timezone of the provider calendar used for the charge due date
    #[envconfig(default = "America/Sao_Paulo")]
    pub due_date_timezone: String,

    /// Text placed before the plan label in the charge description
    #[envconfig(default = "Assinatura Clube 520")]
    pub charge_description_prefix: String,
}

impl AppConfig {
    /// Provider credential, blank values count as not configured
    pub fn api_key(&self) -> Option<&str> {
        self.asaas_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn customers_endpoint(&self) -> String {
        format!("{}/customers", self.asaas_api_url.trim_end_matches('/'))
    }

    pub fn payments_endpoint(&self) -> String {
        format!("{}/payments", self.asaas_api_url.trim_end_matches('/'))
    }

    /// Current date in the provider calendar
    pub fn today(&self) -> anyhow::Result<NaiveDate> {
        let tz: Tz = self.due_date_timezone.parse().map_err(|e| {
            anyhow!(
                "invalid DUE_DATE_TIMEZONE value {:?}: {}",
                self.due_date_timezone,
                e
            )
        })?;

        Ok(Utc::now().with_timezone(&tz).date_naive())
    }

    pub fn charge_description(&self, plan_label: Option<&str>) -> String {
        format!(
            "{prefix} - {plan}",
            prefix = self.charge_description_prefix,
            plan = plan_label.unwrap_or_default()
        )
    }
}
