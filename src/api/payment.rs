use crate::{
    config,
    errors::PaymentError,
    models::{
        asaas::{
            ChargeRequest, ChargeResult, CustomerRecord, CustomerRequest, InvoiceLink,
            ProviderReply,
        },
        function::FunctionEvent,
        submission::{Submission, ValidSubmission},
    },
    services,
};

/// Registers the payer as an Asaas customer and opens a PIX charge for it.
///
/// Guards run in order and stop at the first failure: http method, provider
/// credential, then the submission itself. No provider call is made unless all
/// of them pass. The charge is only requested once the customer was accepted.
///
/// # Arguments
/// * `event` - Http event received by the function
/// * `app_config` - Configuration loaded for this invocation
/// * `provider` - Billing provider the customer and charge are created with
pub async fn initiate_payment(
    event: &FunctionEvent,
    app_config: &config::AppConfig,
    provider: &services::ImplBillingProvider,
) -> Result<InvoiceLink, PaymentError> {
    if !event.is_write() {
        return Err(PaymentError::MethodNotAllowed);
    }

    let api_key = app_config
        .api_key()
        .ok_or(PaymentError::MissingCredential)?;

    let submission = Submission::from_body(event.decoded_body().as_deref())
        .validate()
        .ok_or(PaymentError::MissingRequiredFields)?;

    let customer_id = register_customer(provider, api_key, &submission).await?;

    create_pix_charge(provider, api_key, app_config, customer_id, &submission).await
}

async fn register_customer(
    provider: &services::ImplBillingProvider,
    api_key: &str,
    submission: &ValidSubmission,
) -> Result<String, PaymentError> {
    let raw = provider
        .create_customer(api_key, &CustomerRequest::from(submission))
        .await
        .map_err(unexpected)?;

    match ProviderReply::classify::<CustomerRecord>(raw).map_err(|e| {
        PaymentError::Unexpected(format!("customer response is not valid json: {e}"))
    })? {
        ProviderReply::Accepted(customer_id) => Ok(customer_id),
        ProviderReply::Rejected(raw) => Err(PaymentError::CustomerRejected(raw)),
    }
}

async fn create_pix_charge(
    provider: &services::ImplBillingProvider,
    api_key: &str,
    app_config: &config::AppConfig,
    customer_id: String,
    submission: &ValidSubmission,
) -> Result<InvoiceLink, PaymentError> {
    let due_date = app_config.today().map_err(unexpected)?;
    let description = app_config.charge_description(submission.plan_label.as_deref());
    let request = ChargeRequest::new(customer_id, submission, due_date, description);

    let raw = provider
        .create_charge(api_key, &request)
        .await
        .map_err(unexpected)?;

    match ProviderReply::classify::<ChargeResult>(raw).map_err(|e| {
        PaymentError::Unexpected(format!("charge response is not valid json: {e}"))
    })? {
        ProviderReply::Accepted(link) => Ok(link),
        ProviderReply::Rejected(raw) => Err(PaymentError::ChargeRejected(raw)),
    }
}

fn unexpected(err: anyhow::Error) -> PaymentError {
    PaymentError::Unexpected(format!("{err:#}"))
}
