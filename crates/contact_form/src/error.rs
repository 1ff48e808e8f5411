use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("contact endpoint is not configured")]
    NotConfigured,
    #[error("failed to reach contact endpoint: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("contact endpoint returned HTTP {status}")]
    Status { status: reqwest::StatusCode },
    #[error("malformed contact response: {0}")]
    MalformedBody(String),
    #[error("contact endpoint did not accept the submission")]
    Rejected,
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            SubmitError::Status { status }
        } else if err.is_decode() {
            SubmitError::MalformedBody(err.to_string())
        } else {
            SubmitError::Transport(err)
        }
    }
}
