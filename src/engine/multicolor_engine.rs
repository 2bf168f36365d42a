use crate::engine::{CollectionApi, push_opt};
use crate::error::{Error, Result};
use crate::image::Image;
use crate::multipart::MessageBuilder;
use crate::request::ApiRequest;
use crate::response::ServiceResponse;

/// Client for the multicolor engine.
///
/// On top of the shared [`CollectionApi`], this engine searches by
/// color, extracts and counts dominant colors from images or from the
/// hosted collection, and reads and writes per-image metadata.
///
/// Batch parameters use the service's indexed field convention:
/// `images[0]`, `urls[0]`, `filepaths[0]`, `colors[0]`, `weights[0]`, …
///
/// # Example
///
/// ```rust,no_run
/// use pixmatch::{ColorSearchOptions, MulticolorEngine};
///
/// # fn example() -> pixmatch::Result<()> {
/// let engine = MulticolorEngine::new("http://multicolorengine.example.com/rest/")?;
///
/// // Everything predominantly red, strongest matches first.
/// let resp = engine.color_search_colors(
///     &["255,0,0"],
///     &[1.0],
///     &ColorSearchOptions::default(),
/// )?;
/// for entry in &resp.result {
///     println!("{} scored {}", entry["filepath"], entry["score"]);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MulticolorEngine {
    request: ApiRequest,
}

/// How extracted colors are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    /// Comma-separated `r,g,b` triples.
    Rgb,
    /// Six-digit hex strings.
    Hex,
}

impl ColorFormat {
    fn as_str(self) -> &'static str {
        match self {
            ColorFormat::Rgb => "rgb",
            ColorFormat::Hex => "hex",
        }
    }
}

/// Optional parameters for the color extraction operations.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Maximum number of colors to report.
    pub limit: Option<u32>,
    /// Output format for the palette (default is service-side RGB).
    pub color_format: Option<ColorFormat>,
    /// Exclude the background color from the palette.
    pub ignore_background: Option<bool>,
}

impl ExtractOptions {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_opt(&mut params, "limit", self.limit);
        push_opt(&mut params, "color_format", self.color_format.map(ColorFormat::as_str));
        push_opt(&mut params, "ignore_background", self.ignore_background);
        params
    }
}

/// Optional parameters for the `color_search` operation.
#[derive(Debug, Clone, Default)]
pub struct ColorSearchOptions {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    /// Minimum score (0–100) for a result to be included.
    pub min_score: Option<u8>,
    /// Ignore the image background when scoring.
    pub ignore_background: Option<bool>,
    /// Also ignore background-colored regions inside the image.
    pub ignore_interior_background: Option<bool>,
    /// Restrict results to images whose metadata matches this query
    /// document.
    pub metadata: Option<serde_json::Value>,
}

impl ColorSearchOptions {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_opt(&mut params, "offset", self.offset);
        push_opt(&mut params, "limit", self.limit);
        push_opt(&mut params, "min_score", self.min_score);
        push_opt(&mut params, "ignore_background", self.ignore_background);
        push_opt(
            &mut params,
            "ignore_interior_background",
            self.ignore_interior_background,
        );
        push_opt(&mut params, "metadata", self.metadata.as_ref());
        params
    }
}

impl MulticolorEngine {
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

    // ── color search ─────────────────────────────────────────────────

    /// Search the collection using the palette of an uploaded image.
    pub fn color_search_image(
        &self,
        image: &Image,
        options: &ColorSearchOptions,
    ) -> Result<ServiceResponse> {
        let mut message = MessageBuilder::new();
        message.add_image("image", image.clone())?;
        for (name, value) in options.params() {
            message.add_field(name, value)?;
        }
        self.request.post("color_search", &message)
    }

    /// Search the collection using the palette of an image it already
    /// stores.
    pub fn color_search_filepath(
        &self,
        filepath: &str,
        options: &ColorSearchOptions,
    ) -> Result<ServiceResponse> {
        let mut params = vec![("filepath", filepath.to_string())];
        params.extend(options.params());
        self.request.get("color_search", &params)
    }

    /// Search the collection with explicit colors and optional weights.
    ///
    /// `weights` must be empty or the same length as `colors`.
    pub fn color_search_colors(
        &self,
        colors: &[&str],
        weights: &[f32],
        options: &ColorSearchOptions,
    ) -> Result<ServiceResponse> {
        if !weights.is_empty() && weights.len() != colors.len() {
            return Err(Error::Construction(format!(
                "{} colors but {} weights",
                colors.len(),
                weights.len()
            )));
        }
        let mut message = MessageBuilder::new();
        add_indexed(&mut message, "colors", colors)?;
        add_indexed(&mut message, "weights", weights)?;
        for (name, value) in options.params() {
            message.add_field(name, value)?;
        }
        self.request.post("color_search", &message)
    }

    // ── color extraction ─────────────────────────────────────────────

    /// Extract the dominant colors of uploaded images.
    pub fn extract_image_colors(
        &self,
        images: &[Image],
        options: &ExtractOptions,
    ) -> Result<ServiceResponse> {
        let mut message = MessageBuilder::new();
        for (i, image) in images.iter().enumerate() {
            message.add_image(&format!("images[{i}]"), image.clone())?;
        }
        for (name, value) in options.params() {
            message.add_field(name, value)?;
        }
        self.request.post("extract_image_colors", &message)
    }

    /// Extract the dominant colors of images fetched from URLs.
    pub fn extract_image_colors_urls(
        &self,
        urls: &[&str],
        options: &ExtractOptions,
    ) -> Result<ServiceResponse> {
        let mut message = MessageBuilder::new();
        add_indexed(&mut message, "urls", urls)?;
        for (name, value) in options.params() {
            message.add_field(name, value)?;
        }
        self.request.post("extract_image_colors", &message)
    }

    /// Extract the dominant colors across images already in the
    /// collection. With no filepaths, the whole collection is used.
    pub fn extract_collection_colors(
        &self,
        filepaths: &[&str],
        options: &ExtractOptions,
    ) -> Result<ServiceResponse> {
        let mut message = MessageBuilder::new();
        add_indexed(&mut message, "filepaths", filepaths)?;
        for (name, value) in options.params() {
            message.add_field(name, value)?;
        }
        self.request.post("extract_collection_colors", &message)
    }

    /// Count how many of the uploaded images contain each given color.
    pub fn count_image_colors(
        &self,
        images: &[Image],
        colors: &[&str],
    ) -> Result<ServiceResponse> {
        let mut message = MessageBuilder::new();
        for (i, image) in images.iter().enumerate() {
            message.add_image(&format!("images[{i}]"), image.clone())?;
        }
        add_indexed(&mut message, "colors", colors)?;
        self.request.post("count_image_colors", &message)
    }

    /// Count how many collection images contain each given color.
    pub fn count_collection_colors(
        &self,
        filepaths: &[&str],
        colors: &[&str],
    ) -> Result<ServiceResponse> {
        let mut message = MessageBuilder::new();
        add_indexed(&mut message, "filepaths", filepaths)?;
        add_indexed(&mut message, "colors", colors)?;
        self.request.post("count_collection_colors", &message)
    }

    // ── metadata ─────────────────────────────────────────────────────

    /// Fetch the metadata document stored for a collection image.
    pub fn get_metadata(&self, filepath: &str) -> Result<ServiceResponse> {
        self.request
            .get("get_metadata", &[("filepath", filepath.to_string())])
    }

    /// Replace the metadata documents of collection images.
    ///
    /// `filepaths` and `metadata` are parallel and must be the same
    /// length.
    pub fn update_metadata(
        &self,
        filepaths: &[&str],
        metadata: &[serde_json::Value],
    ) -> Result<ServiceResponse> {
        if filepaths.len() != metadata.len() {
            return Err(Error::Construction(format!(
                "{} filepaths but {} metadata documents",
                filepaths.len(),
                metadata.len()
            )));
        }
        let mut message = MessageBuilder::new();
        add_indexed(&mut message, "filepaths", filepaths)?;
        for (i, doc) in metadata.iter().enumerate() {
            message.add_field(&format!("metadata[{i}]"), doc)?;
        }
        self.request.post("update_metadata", &message)
    }

    /// The metadata keys the collection is indexed on for search
    /// filtering.
    pub fn get_search_metadata(&self) -> Result<ServiceResponse> {
        self.request.get("get_search_metadata", &[])
    }

    /// The metadata keys returned with each search result.
    pub fn get_return_metadata(&self) -> Result<ServiceResponse> {
        self.request.get("get_return_metadata", &[])
    }
}

impl CollectionApi for MulticolorEngine {
    fn request(&self) -> &ApiRequest {
        &self.request
    }
}

/// Add `values` as `name[0]`, `name[1]`, … text fields.
fn add_indexed(
    message: &mut MessageBuilder,
    name: &str,
    values: &[impl std::fmt::Display],
) -> Result<()> {
    for (i, value) in values.iter().enumerate() {
        message.add_field(&format!("{name}[{i}]"), value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn engine() -> MulticolorEngine {
        // Nothing listens on port 1 — only used where no request is sent
        // or where a transport error is the expected outcome.
        MulticolorEngine::new("http://127.0.0.1:1/rest/").unwrap()
    }

    // ── argument validation (fails before any I/O) ───────────────────

    #[test]
    fn color_weight_length_mismatch_rejected() {
        let err = engine()
            .color_search_colors(
                &["255,0,0", "0,0,255"],
                &[1.0],
                &ColorSearchOptions::default(),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Construction);
    }

    #[test]
    fn empty_weights_accepted() {
        // Reaches the transport and fails there, not in validation.
        let err = engine()
            .color_search_colors(&["255,0,0"], &[], &ColorSearchOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn update_metadata_length_mismatch_rejected() {
        let err = engine()
            .update_metadata(&["a.jpg", "b.jpg"], &[serde_json::json!({})])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Construction);
    }

    // ── option serialization ─────────────────────────────────────────

    #[test]
    fn color_format_strings() {
        assert_eq!(ColorFormat::Rgb.as_str(), "rgb");
        assert_eq!(ColorFormat::Hex.as_str(), "hex");
    }

    #[test]
    fn extract_options_params() {
        let options = ExtractOptions {
            limit: Some(8),
            color_format: Some(ColorFormat::Hex),
            ignore_background: Some(true),
        };
        assert_eq!(
            options.params(),
            vec![
                ("limit", "8".to_string()),
                ("color_format", "hex".to_string()),
                ("ignore_background", "true".to_string()),
            ]
        );
    }

    #[test]
    fn color_search_options_metadata_is_compact_json() {
        let options = ColorSearchOptions {
            metadata: Some(serde_json::json!({ "vintage": "2019" })),
            ..Default::default()
        };
        let params = options.params();
        assert_eq!(params, vec![("metadata", r#"{"vintage":"2019"}"#.to_string())]);
    }

    // ── indexed field naming ─────────────────────────────────────────

    #[test]
    fn indexed_fields_follow_service_convention() {
        let mut message = MessageBuilder::new();
        add_indexed(&mut message, "colors", &["255,0,0", "0,255,0"]).unwrap();

        let body = String::from_utf8(message.to_bytes().unwrap()).unwrap();
        assert!(body.contains("name=\"colors[0]\";\r\n\r\n255,0,0\r\n"));
        assert!(body.contains("name=\"colors[1]\";\r\n\r\n0,255,0\r\n"));
    }
}
