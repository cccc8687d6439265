use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("invalid server URL '{url}'")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("server answered {status} for {url}")]
    Status { status: StatusCode, url: String },

    #[error("failed to decode screen config from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type Result<T> = std::result::Result<T, PlayerError>;
