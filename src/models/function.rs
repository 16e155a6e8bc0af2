use base64::{Engine, prelude::BASE64_STANDARD};
use lambda_runtime::tracing;
use serde::{Deserialize, Serialize};

use crate::consts;

/// Http event delivered by the function host
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl FunctionEvent {
    pub fn is_write(&self) -> bool {
        self.http_method.eq_ignore_ascii_case(consts::WRITE_METHOD)
    }

    /// Raw request body as text. A body that can't be decoded is dropped.
    pub fn decoded_body(&self) -> Option<String> {
        let body = self.body.as_deref()?;
        if !self.is_base64_encoded {
            return Some(body.to_string());
        }

        BASE64_STANDARD
            .decode(body.trim())
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .or_else(|| {
                tracing::debug!("base64 body could not be decoded, using an empty body");
                None
            })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub body: String,
}
