//! The request facade binding a service base URL to the transport.

use crate::error::{Error, Result};
use crate::multipart::MessageBuilder;
use crate::response::ServiceResponse;
use crate::transport::Transport;

/// Binds a base API URL (normalized to end with `/`) and optional
/// credentials, and turns endpoint calls into parsed [`ServiceResponse`]
/// values.
///
/// Each call is one stateless round trip: build the URL as
/// `<base><method>/`, delegate to the [`Transport`], parse the returned
/// text as JSON. Transport faults surface as
/// [`Error::Transport`](crate::Error::Transport); a body that is not
/// valid JSON surfaces as [`Error::Parse`](crate::Error::Parse).
#[derive(Debug, Clone)]
pub struct ApiRequest {
    base_url: String,
    transport: Transport,
}

impl ApiRequest {
    /// Bind a base API URL with no credentials.
    ///
    /// Fails with [`Error::Construction`](crate::Error::Construction) if
    /// the URL is empty.
    pub fn new(api_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(api_url)?,
            transport: Transport::new(),
        })
    }

    /// Bind a base API URL with basic-auth credentials.
    pub fn with_credentials(
        api_url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(api_url)?,
            transport: Transport::with_credentials(username, password),
        })
    }

    /// The normalized base URL, always ending with `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `<base><method>/`, with `params` appended as `&`-joined
    /// `name=value` pairs when non-empty, and parse the JSON response.
    pub fn get(&self, method: &str, params: &[(&str, String)]) -> Result<ServiceResponse> {
        let url = build_url(&self.base_url, method, params);
        let text = self.transport.get(&url)?;
        parse_response(method, &text)
    }

    /// POST the serialized `message` to `<base><method>/` and parse the
    /// JSON response.
    pub fn post(&self, method: &str, message: &MessageBuilder) -> Result<ServiceResponse> {
        let url = format!("{}{}/", self.base_url, method);
        let body = message.to_bytes()?;
        let text = self.transport.post(&url, body, message.boundary())?;
        parse_response(method, &text)
    }
}

/// Trim and validate the base URL, guaranteeing a trailing `/`.
fn normalize_base_url(api_url: &str) -> Result<String> {
    let url = api_url.trim();
    if url.is_empty() {
        log::error!("API URL is empty");
        return Err(Error::Construction("API URL is empty".into()));
    }
    if url.ends_with('/') {
        Ok(url.to_string())
    } else {
        Ok(format!("{url}/"))
    }
}

fn build_url(base_url: &str, method: &str, params: &[(&str, String)]) -> String {
    let mut url = format!("{base_url}{method}/");
    if !params.is_empty() {
        let query: Vec<String> = params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        url.push('?');
        url.push_str(&query.join("&"));
    }
    url
}

fn parse_response(method: &str, text: &str) -> Result<ServiceResponse> {
    serde_json::from_str(text).map_err(|e| {
        log::error!("Response to {method} is not valid JSON: {e}");
        log::debug!("Unparsable response body:\n{text}");
        Error::Parse { source: e }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    // ── base URL normalization ───────────────────────────────────────

    #[test]
    fn missing_trailing_slash_normalized() {
        let a = ApiRequest::new("http://localhost/rest").unwrap();
        let b = ApiRequest::new("http://localhost/rest/").unwrap();
        assert_eq!(a.base_url(), b.base_url());
        assert_eq!(a.base_url(), "http://localhost/rest/");
    }

    #[test]
    fn surrounding_whitespace_trimmed() {
        let req = ApiRequest::new("  http://localhost/rest/  ").unwrap();
        assert_eq!(req.base_url(), "http://localhost/rest/");
    }

    #[test]
    fn empty_url_is_construction_error() {
        let err = ApiRequest::new("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Construction);

        let err = ApiRequest::new("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Construction);
    }

    #[test]
    fn credentials_constructor_normalizes_too() {
        let req = ApiRequest::with_credentials("http://x/rest", "user", "pass").unwrap();
        assert_eq!(req.base_url(), "http://x/rest/");
    }

    // ── URL building ─────────────────────────────────────────────────

    #[test]
    fn url_without_params() {
        assert_eq!(
            build_url("http://x/rest/", "ping", &[]),
            "http://x/rest/ping/"
        );
    }

    #[test]
    fn url_params_ampersand_joined() {
        let params = [("offset", "0".to_string()), ("limit", "10".to_string())];
        assert_eq!(
            build_url("http://x/rest/", "list", &params),
            "http://x/rest/list/?offset=0&limit=10"
        );
    }

    // ── response parsing ─────────────────────────────────────────────

    #[test]
    fn valid_json_parses() {
        let resp =
            parse_response("ping", r#"{ "status": "ok", "method": "ping", "result": [] }"#)
                .unwrap();
        assert!(resp.is_ok());
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = parse_response("ping", "<html>502 Bad Gateway</html>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
