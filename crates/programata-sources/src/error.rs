use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}
