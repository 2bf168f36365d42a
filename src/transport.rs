//! Blocking HTTP transport.
//!
//! One GET or one multipart POST per call, optionally with basic
//! authentication. No retries, no caching, and keep-alive is disabled —
//! every request is its own connect/write/read sequence, matching the
//! request-scoped lifecycle of [`MessageBuilder`](crate::MessageBuilder).

use reqwest::blocking::Client;
use reqwest::header::{CONNECTION, CONTENT_TYPE};

use crate::error::{Error, Result};

/// Issues single blocking GET/POST requests and returns response bodies
/// as text.
///
/// Credentials are attached as HTTP basic auth only when both a username
/// and a password were supplied.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    credentials: Option<(String, String)>,
}

impl Transport {
    /// A transport with no credentials.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            credentials: None,
        }
    }

    /// A transport authenticating every request with basic auth.
    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            credentials: Some((username.into(), password.into())),
        }
    }

    /// Perform a GET against an absolute URL and return the response body.
    pub fn get(&self, url: &str) -> Result<String> {
        log::debug!("GET {url}");
        let mut req = self.client.get(url).header(CONNECTION, "close");
        if let Some((user, pass)) = &self.credentials {
            req = req.basic_auth(user, Some(pass));
        }

        let resp = req.send().map_err(|e| {
            log::error!("GET {url} failed: {e}");
            Error::Transport { source: e }
        })?;
        let resp = resp.error_for_status().map_err(|e| {
            log::error!("GET {url} returned error status: {e}");
            Error::Transport { source: e }
        })?;
        resp.text().map_err(|e| {
            log::error!("Failed to read response body from {url}: {e}");
            Error::Transport { source: e }
        })
    }

    /// Perform a multipart/form-data POST against an absolute URL and
    /// return the response body.
    ///
    /// `boundary` must be the token that delimits the parts of `body`.
    pub fn post(&self, url: &str, body: Vec<u8>, boundary: &str) -> Result<String> {
        log::debug!("POST {url} ({} bytes, boundary {boundary})", body.len());
        let mut req = self
            .client
            .post(url)
            .header(CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
            .header(CONNECTION, "close")
            .body(body);
        if let Some((user, pass)) = &self.credentials {
            req = req.basic_auth(user, Some(pass));
        }

        let resp = req.send().map_err(|e| {
            log::error!("POST {url} failed: {e}");
            Error::Transport { source: e }
        })?;
        let resp = resp.error_for_status().map_err(|e| {
            log::error!("POST {url} returned error status: {e}");
            Error::Transport { source: e }
        })?;
        resp.text().map_err(|e| {
            log::error!("Failed to read response body from {url}: {e}");
            Error::Transport { source: e }
        })
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}
