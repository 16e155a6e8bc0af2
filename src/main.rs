//! # PIX checkout function
//!
//! Serverless entry point: registers the payer as an Asaas customer, opens a PIX
//! charge and answers with the hosted invoice url.

use lambda_runtime::{Error, run, service_fn, tracing};

mod api;
mod config;
mod consts;
mod errors;
mod handler;
mod models;
mod services;
mod utils;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    run(service_fn(handler::function_handler)).await
}
