use derive_more::{Display, Error};
use lambda_runtime::tracing;
use serde_json::json;

use crate::{
    consts,
    models::{asaas::InvoiceLink, function::FunctionResponse},
};

#[derive(Debug, Display, Error, PartialEq)]
pub enum PaymentError {
    #[display("method not allowed")]
    MethodNotAllowed,
    #[display("ASAAS_KEY is not configured")]
    MissingCredential,
    #[display("missing required fields")]
    MissingRequiredFields,
    #[display("customer rejected by provider: {_0}")]
    CustomerRejected(#[error(not(source))] String),
    #[display("charge rejected by provider: {_0}")]
    ChargeRejected(#[error(not(source))] String),
    #[display("unexpected error: {_0}")]
    Unexpected(#[error(not(source))] String),
}

impl PaymentError {
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::MethodNotAllowed => 405,
            PaymentError::MissingRequiredFields => 400,
            _ => 500,
        }
    }

    /// Body sent back to the caller. Provider rejections are passed through untouched.
    pub fn body(&self) -> String {
        match self {
            PaymentError::MethodNotAllowed => consts::MSG_METHOD_NOT_ALLOWED.to_string(),
            PaymentError::MissingRequiredFields => consts::MSG_MISSING_REQUIRED_FIELDS.to_string(),
            PaymentError::MissingCredential => {
                json!({ "error": consts::MSG_MISSING_CREDENTIAL }).to_string()
            }
            PaymentError::CustomerRejected(raw) | PaymentError::ChargeRejected(raw) => raw.clone(),
            PaymentError::Unexpected(msg) => json!({ "error": msg }).to_string(),
        }
    }
}

impl From<Result<InvoiceLink, PaymentError>> for FunctionResponse {
    fn from(outcome: Result<InvoiceLink, PaymentError>) -> Self {
        match outcome {
            Ok(link) => FunctionResponse {
                status_code: 200,
                body: json!({ "status": "ok", "invoiceUrl": link.invoice_url }).to_string(),
            },
            Err(err) => {
                match err.status_code() {
                    500 => tracing::error!("{err}"),
                    _ => tracing::warn!("{err}"),
                }

                FunctionResponse {
                    status_code: err.status_code(),
                    body: err.body(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse_body(response: &FunctionResponse) -> Value {
        serde_json::from_str(&response.body).unwrap()
    }

    #[test]
    fn test_success_response() {
        let response = FunctionResponse::from(Ok(InvoiceLink {
            invoice_url: "https://pay/inv_1".into(),
        }));

        assert_eq!(response.status_code, 200);
        assert_eq!(
            parse_body(&response),
            json!({"status": "ok", "invoiceUrl": "https://pay/inv_1"})
        );
    }

    #[test]
    fn test_plain_text_client_errors() {
        let response = FunctionResponse::from(Err(PaymentError::MethodNotAllowed));
        assert_eq!(response.status_code, 405);
        assert_eq!(response.body, "Método não permitido");

        let response = FunctionResponse::from(Err(PaymentError::MissingRequiredFields));
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, "Campos obrigatórios ausentes");
    }

    #[test]
    fn test_missing_credential_response() {
        let response = FunctionResponse::from(Err(PaymentError::MissingCredential));

        assert_eq!(response.status_code, 500);
        let error = parse_body(&response)["error"].as_str().unwrap().to_string();
        assert!(error.contains("ASAAS_KEY"));
    }

    #[test]
    fn test_provider_rejection_is_verbatim() {
        let raw = r#"{"errors":[{"code":"invalid_value","description":"Valor inválido"}]}"#;

        for err in [
            PaymentError::CustomerRejected(raw.into()),
            PaymentError::ChargeRejected(raw.into()),
        ] {
            let response = FunctionResponse::from(Err(err));
            assert_eq!(response.status_code, 500);
            assert_eq!(response.body, raw);
        }
    }

    #[test]
    fn test_unexpected_response() {
        let response = FunctionResponse::from(Err(PaymentError::Unexpected(
            "error sending request".into(),
        )));

        assert_eq!(response.status_code, 500);
        assert_eq!(parse_body(&response), json!({"error": "error sending request"}));
    }
}
