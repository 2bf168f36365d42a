use crate::engine::CollectionApi;
use crate::error::Result;
use crate::request::ApiRequest;

/// Client for the mobile image matching engine.
///
/// Tuned for matching photos taken with phone cameras — skew, glare,
/// and partial occlusion tolerant. The operation surface is the shared
/// [`CollectionApi`].
#[derive(Debug, Clone)]
pub struct MobileEngine {
    request: ApiRequest,
}

impl MobileEngine {
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

impl CollectionApi for MobileEngine {
    fn request(&self) -> &ApiRequest {
        &self.request
    }
}
