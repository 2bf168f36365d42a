use crate::engine::CollectionApi;
use crate::error::Result;
use crate::request::ApiRequest;

/// Client for the general-purpose image matching engine.
///
/// Finds duplicate, modified, and transformed copies of collection
/// images. Supports every [`CollectionApi`] operation.
///
/// # Example
///
/// ```rust,no_run
/// use pixmatch::{CollectionApi, MatchEngine};
///
/// # fn example() -> pixmatch::Result<()> {
/// let engine = MatchEngine::new("http://matchengine.example.com/rest/")?;
/// let resp = engine.ping()?;
/// assert!(resp.is_ok());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MatchEngine {
    request: ApiRequest,
}

impl MatchEngine {
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

impl CollectionApi for MatchEngine {
    fn request(&self) -> &ApiRequest {
        &self.request
    }
}
