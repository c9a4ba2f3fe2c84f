use url::Url;

use crate::{error::ApiError, upstream::DEFAULT_API_BASE};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub api_base: Url,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// `PORT` is required; `UPSTREAM_API_BASE` optionally replaces the
    /// recording API host.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let raw_port = lookup("PORT")
            .as_deref()
            .and_then(non_empty)
            .map(ToString::to_string)
            .ok_or_else(|| ApiError::internal("$PORT must be set"))?;
        let port = raw_port
            .parse::<u16>()
            .map_err(|error| ApiError::internal(format!("Invalid $PORT {raw_port:?}: {error}")))?;

        let api_base = match lookup("UPSTREAM_API_BASE").as_deref().and_then(non_empty) {
            Some(configured) => parse_api_base(configured)?,
            None => parse_api_base(DEFAULT_API_BASE)?,
        };

        Ok(Self { port, api_base })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_api_base(value: &str) -> Result<Url, ApiError> {
    let parsed = Url::parse(value).map_err(|error| {
        ApiError::internal(format!("Invalid UPSTREAM_API_BASE {value:?}: {error}"))
    })?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ApiError::internal(format!(
            "UPSTREAM_API_BASE must be an http(s) URL, got {value:?}"
        )));
    }

    Ok(parsed)
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
