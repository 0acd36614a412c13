use anyhow::anyhow;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const EMAIL_VAR: &str = "TOKENPOST_EMAIL";
pub const PASSWORD_VAR: &str = "TOKENPOST_PASSWORD";

#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct Config {
    pub login_url: String,
    pub data_url: String,
    pub timeout_secs: Option<u64>,
    pub credentials: Credentials,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut f = File::open(path)?;
        let mut buf: Vec<u8> = Vec::new();
        f.read_to_end(&mut buf)?;
        let mut config = Self::from_slice(&buf)?;
        config.apply_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    fn from_slice(buf: &[u8]) -> anyhow::Result<Self> {
        Ok(toml::from_slice(buf)?)
    }

    /// Replace credentials with whatever `lookup` finds for the
    /// `TOKENPOST_*` variables.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(email) = lookup(EMAIL_VAR) {
            self.credentials.email = email;
        }
        if let Some(password) = lookup(PASSWORD_VAR) {
            self.credentials.password = Some(password);
        }
    }

    pub fn password(&self) -> anyhow::Result<&str> {
        self.credentials.password.as_deref().ok_or_else(|| {
            anyhow!(
                "no password in [credentials] and {} is not set",
                PASSWORD_VAR
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const FULL: &str = r#"
login_url = "https://api.example.com/login"
data_url = "https://api.example.com/data"
timeout_secs = 30

[credentials]
email = "ana@example.com"
password = "hunter2"
"#;

    #[test]
    fn parses_full_config() {
        let config = Config::from_slice(FULL.as_bytes()).unwrap();
        assert_eq!(config.login_url, "https://api.example.com/login");
        assert_eq!(config.data_url, "https://api.example.com/data");
        assert_eq!(config.timeout_secs, Some(30));
        assert_eq!(config.credentials.email, "ana@example.com");
        assert_eq!(config.password().unwrap(), "hunter2");
    }

    #[test]
    fn password_may_come_from_env() {
        let mut config = Config::from_slice(
            br#"
login_url = "https://api.example.com/login"
data_url = "https://api.example.com/data"

[credentials]
email = "ana@example.com"
"#,
        )
        .unwrap();
        assert!(config.timeout_secs.is_none());
        assert!(config.password().is_err());

        let env: HashMap<&str, String> = [(PASSWORD_VAR, "from-env".to_string())].into();
        config.apply_overrides(|k| env.get(k).cloned());
        assert_eq!(config.password().unwrap(), "from-env");
        assert_eq!(config.credentials.email, "ana@example.com");
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = Config::from_slice(FULL.as_bytes()).unwrap();
        let env: HashMap<&str, String> = [
            (EMAIL_VAR, "bia@example.com".to_string()),
            (PASSWORD_VAR, "s3cret".to_string()),
        ]
        .into();
        config.apply_overrides(|k| env.get(k).cloned());
        assert_eq!(config.credentials.email, "bia@example.com");
        assert_eq!(config.password().unwrap(), "s3cret");
    }

    #[test]
    fn missing_url_is_an_error() {
        let res = Config::from_slice(
            br#"
login_url = "https://api.example.com/login"

[credentials]
email = "ana@example.com"
"#,
        );
        assert!(res.is_err());
    }
}
