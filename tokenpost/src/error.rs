use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenPostError {
    #[error("Failed to login: status code {0} -- {1}")]
    Login(StatusCode, String),
    #[error("API error: status code {0} -- {1}")]
    Api(StatusCode, String),
    #[error("invalid json: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("login response has no access_token")]
    MissingToken,
    #[error("access_token can not be sent as a header value")]
    InvalidToken,
    #[error("invalid url {0:?}: {1}")]
    InvalidUrl(String, String),
    #[error("reqwest error: {0}")]
    Transport(#[from] reqwest::Error),
}
