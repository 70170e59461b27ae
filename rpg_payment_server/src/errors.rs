use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::error;
use rpg_payment_engine::ReconciliationError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("Invalid request. {0}")]
    ValidationError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("The payment gateway reported an error. {0}")]
    GatewayError(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ServerError {
    /// A short, client-facing summary for server-side failures. The full error text goes in the `error` field.
    fn summary(&self) -> &'static str {
        match self {
            Self::GatewayError(_) => "The payment gateway request failed",
            Self::ConfigurationError(_) => "The server is not configured correctly",
            _ => "Internal server error",
        }
    }

    /// The underlying error text.
    fn detail(&self) -> String {
        match self {
            Self::ValidationError(s) |
            Self::InvalidRequestBody(s) |
            Self::GatewayError(s) |
            Self::NoRecordFound(s) |
            Self::BackendError(s) |
            Self::ConfigurationError(s) |
            Self::InitializeError(s) |
            Self::Unspecified(s) => s.clone(),
            Self::IOError(e) => e.to_string(),
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::GatewayError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // Client errors are explained in the message itself. Server errors get a summary, plus the cause.
        let body = if status.is_server_error() {
            error!("💻️ {self}");
            json!({ "success": false, "message": self.summary(), "error": self.detail() })
        } else {
            json!({ "success": false, "message": self.detail() })
        };
        HttpResponse::build(status).insert_header(ContentType::json()).body(body.to_string())
    }
}

impl From<ReconciliationError> for ServerError {
    fn from(e: ReconciliationError) -> Self {
        match e {
            ReconciliationError::ValidationError(s) => Self::ValidationError(s),
            ReconciliationError::GatewayError(s) => Self::GatewayError(s),
            ReconciliationError::NotFoundError(s) => Self::NoRecordFound(s),
            ReconciliationError::StorageError(s) => Self::BackendError(s),
            ReconciliationError::ConfigurationError(s) => Self::ConfigurationError(s),
        }
    }
}
