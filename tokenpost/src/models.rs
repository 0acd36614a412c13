use crate::error::TokenPostError;
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Login body. The server expects the password under `senha`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

impl Credentials {
    pub fn new<E, P>(email: E, password: P) -> Self
    where
        E: Into<String>,
        P: Into<String>,
    {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Bearer token handed out by the login endpoint. Never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn bearer(&self) -> crate::Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.0))
            .map_err(|_| TokenPostError::InvalidToken)?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Pull `access_token` out of a login response body. The token must be
    /// usable as a bearer header value.
    pub(crate) fn from_login_body(body: &[u8]) -> crate::Result<Self> {
        let json: Value = serde_json::from_slice(body)?;
        let token = json
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(|t| Token(t.to_string()))
            .ok_or(TokenPostError::MissingToken)?;
        token.bearer()?;
        Ok(token)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(..)")
    }
}

/// The body posted to the data endpoint. Its contents are fixed.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DataPayload {
    key1: &'static str,
    key2: &'static str,
}

impl Default for DataPayload {
    fn default() -> Self {
        Self {
            key1: "Valor 1",
            key2: "valor 2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_bytes_are_fixed() {
        let s = serde_json::to_string(&DataPayload::default()).unwrap();
        assert_eq!(s, r#"{"key1":"Valor 1","key2":"valor 2"}"#);
    }

    #[test]
    fn credentials_use_senha_on_the_wire() {
        let creds = Credentials::new("ana@example.com", "hunter2");
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(json["email"], "ana@example.com");
        assert_eq!(json["senha"], "hunter2");
        assert!(json.get("password").is_none());

        let back: Credentials = serde_json::from_value(json).unwrap();
        assert_eq!(back, creds);
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("ana@example.com", "hunter2");
        let dbg = format!("{:?}", creds);
        assert!(dbg.contains("ana@example.com"));
        assert!(!dbg.contains("hunter2"));
    }

    #[test]
    fn token_from_login_body() {
        let t = Token::from_login_body(br#"{"access_token":"T","expires_in":3600}"#).unwrap();
        assert_eq!(t.as_str(), "T");
        assert_eq!(format!("{:?}", t), "Token(..)");
        assert_eq!(t.bearer().unwrap(), "Bearer T");
    }

    #[test]
    fn token_must_be_a_non_empty_string() {
        for body in [
            r#"{}"#,
            r#"{"access_token":null}"#,
            r#"{"access_token":42}"#,
            r#"{"access_token":""}"#,
            r#"["access_token"]"#,
        ] {
            let err = Token::from_login_body(body.as_bytes()).unwrap_err();
            assert!(matches!(err, TokenPostError::MissingToken), "{}", body);
        }
    }

    #[test]
    fn token_body_must_be_json() {
        let err = Token::from_login_body(b"<html>nope</html>").unwrap_err();
        assert!(matches!(err, TokenPostError::InvalidJson(_)));
    }

    #[test]
    fn token_with_newline_is_not_a_header() {
        let err = Token::from_login_body(br#"{"access_token":"a\nb"}"#).unwrap_err();
        assert!(matches!(err, TokenPostError::InvalidToken));
    }
}
