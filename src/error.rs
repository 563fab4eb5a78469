//! Custom error types for the dashboard backend
//!
//! Upstream failures, client-facing API errors and startup configuration
//! errors each get their own enum.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::constants::messages;

/// Failures talking to the upstream price provider
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("CoinGecko API error: {status}")]
    Http { status: u16 },

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// Symbol outside the supported coin list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported coin: {0}")]
pub struct UnsupportedCoin(pub String);

/// Errors returned by HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{}", messages::INVALID_SYMBOL)]
    InvalidSymbol,

    #[error("{}", messages::FETCH_FAILED)]
    Upstream(#[from] UpstreamError),
}

/// Wire shape of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidSymbol => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let details = match self {
            ApiError::InvalidSymbol => None,
            ApiError::Upstream(e) => Some(e.to_string()),
        };
        ErrorBody { error: self.to_string(), details }
    }
}

impl From<UnsupportedCoin> for ApiError {
    fn from(_: UnsupportedCoin) -> Self {
        ApiError::InvalidSymbol
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Startup configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid URL for {field}: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid header value for {field}: {value}")]
    InvalidHeader { field: &'static str, value: String },

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
}
