use ark_types::GENERIC_FAILURE_MESSAGE;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("failed to create HTTP client: {0}")]
    Build(String),

    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("backend returned HTTP {status}")]
    Status { status: u16, detail: Option<String> },

    #[error("invalid response body: {0}")]
    Decode(String),

    /// The backend answered 2xx but the body breaks the response contract.
    #[error("{0}")]
    Contract(String),
}

impl ClientError {
    /// Text surfaced to the user as the run's error message.
    ///
    /// A server-supplied `detail` is shown verbatim; everything else
    /// collapses to the generic failure text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Contract(msg) => msg.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
