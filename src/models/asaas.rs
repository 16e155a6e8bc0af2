//! Asaas request and response records.
//!
//! Responses are read into optional-field structs and classified by the presence
//! of their success marker (`id` for customers, `invoiceUrl` for charges).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::submission::ValidSubmission;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub name: String,
    pub email: String,
    /// empty string when the payer didn't send one
    pub cpf_cnpj: String,
    pub phone: String,
}

impl From<&ValidSubmission> for CustomerRequest {
    fn from(submission: &ValidSubmission) -> Self {
        Self {
            name: submission.name.clone(),
            email: submission.email.clone(),
            cpf_cnpj: submission.tax_id.clone(),
            phone: submission.phone.clone(),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct CustomerRecord {
    pub id: Option<String>,
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
pub enum BillingType {
    #[default]
    Pix,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequest {
    pub customer: String,
    pub billing_type: BillingType,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub due_date: NaiveDate,
    pub description: String,
}

impl ChargeRequest {
    pub fn new(
        customer_id: String,
        submission: &ValidSubmission,
        due_date: NaiveDate,
        description: String,
    ) -> Self {
        Self {
            customer: customer_id,
            billing_type: BillingType::Pix,
            value: submission.amount,
            due_date,
            description,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChargeResult {
    pub invoice_url: Option<String>,
}

/// Hosted invoice page returned to the payer
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLink {
    pub invoice_url: String,
}

/// Provider record that carries a success marker
pub trait ProviderRecord: DeserializeOwned {
    type Marker;

    fn into_marker(self) -> Option<Self::Marker>;
}

impl ProviderRecord for CustomerRecord {
    type Marker = String;

    fn into_marker(self) -> Option<String> {
        self.id.filter(|id| !id.is_empty())
    }
}

impl ProviderRecord for ChargeResult {
    type Marker = InvoiceLink;

    fn into_marker(self) -> Option<InvoiceLink> {
        self.invoice_url
            .filter(|url| !url.is_empty())
            .map(|invoice_url| InvoiceLink { invoice_url })
    }
}

#[derive(Debug, PartialEq)]
pub enum ProviderReply<T> {
    Accepted(T),
    /// raw response body, kept verbatim
    Rejected(String),
}

impl<T> ProviderReply<T> {
    /// Classifies a raw provider response. Fails only when the body is not a json
    /// object.
    pub fn classify<R>(raw: String) -> serde_json::Result<Self>
    where
        R: ProviderRecord<Marker = T>,
    {
        let record: R = serde_json::from_str(&raw)?;

        Ok(match record.into_marker() {
            Some(marker) => ProviderReply::Accepted(marker),
            None => ProviderReply::Rejected(raw),
        })
    }
}
