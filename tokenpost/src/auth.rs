use crate::error::TokenPostError;
use crate::models::{Credentials, Token};
use reqwest::{header, Client, Method, Request, Response, Url};
use serde::Serialize;
use slog::{debug, info, Logger};
use std::time::Duration;

type Result<T> = std::result::Result<T, TokenPostError>;

pub(crate) struct AuthClient {
    client: Client,
    credentials: Credentials,
    log: Logger,
}

impl AuthClient {
    pub(crate) fn new(
        credentials: Credentials,
        timeout: Option<Duration>,
        log: Logger,
    ) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.append(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let mut builder = Client::builder().default_headers(headers);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            client: builder.build()?,
            credentials,
            log,
        })
    }

    pub(crate) fn request<B>(
        &self,
        method: Method,
        url: &Url,
        token: Option<&Token>,
        body: Option<&B>,
    ) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let mut rb = self.client.request(method, url.clone());

        if let Some(token) = token {
            rb = rb.header(header::AUTHORIZATION, token.bearer()?);
        }

        if let Some(b) = body {
            rb = rb.json(b);
        }

        Ok(rb.build()?)
    }

    pub(crate) async fn execute(&self, request: Request) -> Result<Response> {
        debug!(self.log, "sending request";
            "method" => request.method().as_str(),
            "url" => request.url().as_str());
        let res = self.client.execute(request).await?;
        debug!(self.log, "received response"; "status" => res.status().as_u16());
        Ok(res)
    }

    /// Trade the credentials for a bearer token.
    pub(crate) async fn sign_in(&self, url: &Url) -> Result<Token> {
        let mut req = self.request(Method::POST, url, None, Some(&self.credentials))?;
        let headers = req.headers_mut();
        headers.insert(
            header::CACHE_CONTROL,
            header::HeaderValue::from_static("no-cache"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let res = self.execute(req).await?;
        let status = res.status();
        if !status.is_success() {
            return Err(TokenPostError::Login(status, res.text().await?));
        }

        let body = res.bytes().await?;
        let token = Token::from_login_body(&body)?;
        info!(self.log, "signed in"; "email" => &self.credentials.email);

        Ok(token)
    }
}
