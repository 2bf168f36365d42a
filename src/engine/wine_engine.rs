use crate::engine::CollectionApi;
use crate::error::Result;
use crate::request::ApiRequest;

/// Client for the wine label matching engine.
///
/// Matches label photos against a collection of bottle and label shots.
/// The operation surface is the shared [`CollectionApi`].
#[derive(Debug, Clone)]
pub struct WineEngine {
    request: ApiRequest,
}

impl WineEngine {
    pub fn new(api_url: &str) -> Result<Self> {
        Ok(Self {
            request: ApiRequest::new(api_url)?,
        })
    }

    pub fn with_credentials(
        api_url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            request: ApiRequest::with_credentials(api_url, username, password)?,
        })
    }
}

impl CollectionApi for WineEngine {
    fn request(&self) -> &ApiRequest {
        &self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_normalizes_base_url() {
        let engine = WineEngine::new("http://localhost/rest").unwrap();
        assert_eq!(engine.request().base_url(), "http://localhost/rest/");
    }
}
