//! JSON bodies returned by the API variant.

use crate::model::extraction::ExtractedFields;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Successful `POST /extract`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub parsed_json: ExtractedFields,
}

/// `POST /extract` whose model reply was not a usable JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseFailureResponse {
    pub error: String,
    pub raw_response: String,
}
