use envconfig::Envconfig;
use futures::FutureExt;
use lambda_runtime::{
    Error, LambdaEvent,
    tracing::{self, Instrument},
};
use std::panic::AssertUnwindSafe;

use crate::{
    api, config,
    errors::PaymentError,
    models::{
        asaas::InvoiceLink,
        function::{FunctionEvent, FunctionResponse},
    },
    services, utils,
};

type Setup = Result<(config::AppConfig, services::ImplBillingProvider), PaymentError>;

/// Reads the environment on every invocation
fn from_env() -> Setup {
    let app_config = config::AppConfig::init_from_env()
        .map_err(|e| PaymentError::Unexpected(format!("configuration could not be read: {e}")))?;

    let provider: services::ImplBillingProvider =
        Box::new(services::asaas::AsaasClient::new(&app_config));

    Ok((app_config, provider))
}

async fn process(
    event: &FunctionEvent,
    setup: impl FnOnce() -> Setup,
) -> Result<InvoiceLink, PaymentError> {
    // wrong methods get their 405 even when the environment is broken
    if !event.is_write() {
        return Err(PaymentError::MethodNotAllowed);
    }

    let (app_config, provider) = setup()?;

    api::payment::initiate_payment(event, &app_config, &provider).await
}

/// Always answers the caller, panics included
async fn respond(event: &FunctionEvent, setup: impl FnOnce() -> Setup) -> FunctionResponse {
    let outcome = AssertUnwindSafe(process(event, setup))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(PaymentError::Unexpected(utils::panic_message(panic.as_ref()))));

    FunctionResponse::from(outcome)
}

pub async fn function_handler(
    event: LambdaEvent<FunctionEvent>,
) -> Result<FunctionResponse, Error> {
    let span = tracing::info_span!("function_handler", req_id = %event.context.request_id);

    Ok(respond(&event.payload, from_env).instrument(span).await)
}
