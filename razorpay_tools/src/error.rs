use thiserror::Error;

#[derive(Debug, Error)]
pub enum RazorpayApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}

impl RazorpayApiError {
    /// True if Razorpay told us that the requested entity does not exist. Razorpay reports unknown ids either as a
    /// 404, or as a 400 whose description says the id does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::QueryError { status: 404, .. } => true,
            Self::QueryError { status: 400, message } => message.contains("does not exist"),
            _ => false,
        }
    }
}
