use crate::error::TokenPostError;
use reqwest::Url;

/// Where to sign in and where to post the payload once signed in.
#[derive(Clone, Debug)]
pub struct Endpoints {
    login: Url,
    data: Url,
}

impl Endpoints {
    pub fn new<L, D>(login: L, data: D) -> crate::Result<Self>
    where
        L: AsRef<str>,
        D: AsRef<str>,
    {
        Ok(Self {
            login: parse_url(login.as_ref())?,
            data: parse_url(data.as_ref())?,
        })
    }

    pub fn login_url(&self) -> &Url {
        &self.login
    }

    pub fn data_url(&self) -> &Url {
        &self.data
    }
}

fn parse_url(s: &str) -> crate::Result<Url> {
    Url::parse(s).map_err(|e| TokenPostError::InvalidUrl(s.to_string(), e.to_string()))
}
