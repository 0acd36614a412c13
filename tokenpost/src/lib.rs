//! Sign in to a login endpoint with an email and password, then post a fixed
//! JSON payload to a second endpoint using the bearer token it handed out.

use reqwest::{Method, Response};
use slog::{info, o, Logger};
use std::time::Duration;

mod auth;
pub mod endpoint;
pub mod error;
mod models;
pub use endpoint::Endpoints;
pub use error::TokenPostError;
pub use models::{Credentials, DataPayload, Token};

pub type Result<T> = std::result::Result<T, error::TokenPostError>;

pub struct TokenPostClientBuilder {
    endpoints: Endpoints,
    credentials: Credentials,
    timeout: Option<Duration>,
    log: Option<Logger>,
}

impl TokenPostClientBuilder {
    fn new(endpoints: Endpoints, credentials: Credentials) -> Self {
        Self {
            endpoints,
            credentials,
            timeout: None,
            log: None,
        }
    }

    pub fn logger(mut self, log: Logger) -> Self {
        self.log = Some(log);
        self
    }

    /// Applies to each request separately. No timeout is set by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Given the provided credentials attempt to login to the service
    pub async fn build(self) -> Result<TokenPostClient> {
        let log = self
            .log
            .unwrap_or_else(|| Logger::root(slog::Discard, o!()));
        TokenPostClient::from_creds(self.endpoints, self.credentials, self.timeout, log).await
    }
}

pub struct TokenPostClient {
    auth: auth::AuthClient,
    endpoints: Endpoints,
    token: Token,
    log: Logger,
}

impl TokenPostClient {
    pub fn builder<E, P>(endpoints: Endpoints, email: E, password: P) -> TokenPostClientBuilder
    where
        E: Into<String>,
        P: Into<String>,
    {
        TokenPostClientBuilder::new(endpoints, Credentials::new(email, password))
    }

    async fn from_creds(
        endpoints: Endpoints,
        credentials: Credentials,
        timeout: Option<Duration>,
        log: Logger,
    ) -> Result<Self> {
        let auth = auth::AuthClient::new(credentials, timeout, log.clone())?;
        let token = auth.sign_in(endpoints.login_url()).await?;

        Ok(Self {
            auth,
            endpoints,
            token,
            log,
        })
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Post the fixed payload to the data endpoint and return the response
    /// body as is.
    pub async fn send(&self) -> Result<String> {
        let payload = DataPayload::default();
        let json = serde_json::to_string(&payload)?;
        info!(self.log, "posting payload";
            "url" => self.endpoints.data_url().as_str(),
            "payload" => json);

        let req = self.auth.request(
            Method::POST,
            self.endpoints.data_url(),
            Some(&self.token),
            Some(&payload),
        )?;
        let res = self.auth.execute(req).await?;
        get_api_response(res).await
    }
}

/// Sign in and post the payload in one go, returning the data response body.
pub async fn run<E, P>(endpoints: Endpoints, email: E, password: P, log: Logger) -> Result<String>
where
    E: Into<String>,
    P: Into<String>,
{
    let client = TokenPostClient::builder(endpoints, email, password)
        .logger(log)
        .build()
        .await?;
    client.send().await
}

/// Check for a successful API response or return a TokenPostError
async fn get_api_response(r: Response) -> Result<String> {
    let status = r.status();
    if status.is_success() {
        Ok(r.text().await?)
    } else {
        Err(TokenPostError::Api(status, r.text().await?))
    }
}
