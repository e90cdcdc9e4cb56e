use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use order_watch_engine::CycleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("The order snapshot could not be loaded or saved. {0}")]
    SnapshotError(String),
    #[error("The marketplace could not be queried. {0}")]
    OrderSourceError(String),
    #[error("The notification could not be delivered. {0}")]
    DeliveryError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SnapshotError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::OrderSourceError(_) => StatusCode::BAD_GATEWAY,
            Self::DeliveryError(_) => StatusCode::BAD_GATEWAY,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<CycleError> for ServerError {
    fn from(e: CycleError) -> Self {
        match e {
            CycleError::SnapshotStore(e) => Self::SnapshotError(e.to_string()),
            CycleError::OrderSource(e) => Self::OrderSourceError(e.to_string()),
            CycleError::Delivery(e) => Self::DeliveryError(e.to_string()),
        }
    }
}
