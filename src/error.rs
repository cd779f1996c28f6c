//! Error handling.

use axum::{
    extract::rejection::QueryRejection,
    http::header,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{event, Level};

/// Errors loading the dataset
///
/// These never reach an API caller: the dataset store replaces a dataset that fails to load with
/// a placeholder.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Error reading the dataset file
    #[error("failed to read dataset file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error deserialising the dataset file
    #[error("failed to parse dataset file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The dataset contains no districts
    #[error("dataset contains no districts")]
    Empty,

    /// A district record has an empty name
    #[error("district at index {index} has an empty name")]
    EmptyDistrictName { index: usize },

    /// Two district records share a name
    #[error("duplicate district {name} in dataset")]
    DuplicateDistrict { name: String },
}

/// Statistics API error type
///
/// This type encapsulates the various errors that may occur while answering a query.
/// Each variant may result in a different API error response.
#[derive(Debug, Error)]
pub enum StatsError {
    /// No district matches the requested name
    #[error("District '{name}' not found")]
    DistrictNotFound { name: String },

    /// No route matches the request path
    #[error("Endpoint not found")]
    EndpointNotFound,

    /// Error deserialising query parameters
    #[error("query parameters are not valid")]
    QueryRejection(#[from] QueryRejection),

    /// Error validating query parameters
    #[error("query parameters are not valid")]
    QueryValidation(#[from] validator::ValidationErrors),

    /// Error formatting a timestamp
    #[error("failed to format timestamp")]
    TimestampFormat(#[from] time::error::Format),
}

impl IntoResponse for StatsError {
    /// Convert from a `StatsError` into an [axum::response::Response].
    fn into_response(self) -> Response {
        ErrorResponse::from(self).into_response()
    }
}

/// Body of error response
///
/// Implements serde (de)serialise.
#[derive(Deserialize, Serialize)]
struct ErrorBody {
    /// Main error message
    message: String,

    /// Optional list of causes
    #[serde(skip_serializing_if = "Option::is_none")]
    caused_by: Option<Vec<String>>,
}

impl ErrorBody {
    /// Return a new ErrorBody
    ///
    /// # Arguments
    ///
    /// * `error`: The error that occurred
    fn new<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let message = error.to_string();
        let mut caused_by: Vec<String> = error_causes(error).collect();
        // Remove duplicate entries.
        caused_by.dedup();
        let caused_by = (!caused_by.is_empty()).then_some(caused_by);
        ErrorBody { message, caused_by }
    }
}

/// Iterate over the messages of an error's chain of sources.
pub fn error_causes<'a>(error: &'a (dyn Error + 'static)) -> impl Iterator<Item = String> + 'a {
    std::iter::successors(error.source(), |&source| source.source()).map(|source| source.to_string())
}

/// A response to send in error cases
///
/// Implements serde (de)serialise.
#[derive(Deserialize, Serialize)]
struct ErrorResponse {
    /// HTTP status of the response
    #[serde(skip)]
    status: StatusCode,

    /// Response body
    error: ErrorBody,
}

impl ErrorResponse {
    /// Return a new ErrorResponse
    ///
    /// # Arguments
    ///
    /// * `status`: HTTP status of the response
    /// * `error`: The error that occurred. This will be formatted into a suitable `ErrorBody`
    fn new<E>(status: StatusCode, error: &E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ErrorResponse {
            status,
            error: ErrorBody::new(error),
        }
    }

    /// Return a 400 bad request ErrorResponse
    fn bad_request<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    /// Return a 404 not found ErrorResponse
    fn not_found<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::new(StatusCode::NOT_FOUND, error)
    }

    /// Return a 500 internal server error ErrorResponse
    fn internal_server_error<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }
}

impl From<StatsError> for ErrorResponse {
    /// Convert from a `StatsError` into an `ErrorResponse`.
    fn from(error: StatsError) -> Self {
        let response = match &error {
            // Bad request
            StatsError::QueryRejection(_) | StatsError::QueryValidation(_) => {
                Self::bad_request(&error)
            }

            // Not found
            StatsError::DistrictNotFound { name: _ } | StatsError::EndpointNotFound => {
                Self::not_found(&error)
            }

            // Internal server error
            StatsError::TimestampFormat(_) => Self::internal_server_error(&error),
        };

        // Log server errors.
        if response.status.is_server_error() {
            event!(Level::ERROR, "{}", error.to_string());
            for cause in error_causes(&error) {
                event!(Level::ERROR, "Caused by: {}", cause);
            }
        }

        response
    }
}

impl IntoResponse for ErrorResponse {
    /// Convert from an `ErrorResponse` into an `axum::response::Response`.
    ///
    /// Renders the response as JSON.
    fn into_response(self) -> Response {
        let json_body = serde_json::to_string_pretty(&self);
        match json_body {
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialise error response: {}", err),
            )
                .into_response(),
            Ok(json_body) => (
                self.status,
                [(&header::CONTENT_TYPE, mime::APPLICATION_JSON.to_string())],
                json_body,
            )
                .into_response(),
        }
    }
}
