//! Typed clients for the hosted PixMatch engines.
//!
//! Every engine speaks the same collection API — ping, add, delete,
//! count, list, search, compare — provided here as the [`CollectionApi`]
//! trait with default method bodies over the engine's embedded
//! [`ApiRequest`]. The engine structs add nothing but their service
//! endpoint, except [`MulticolorEngine`], which layers color extraction,
//! color search, and per-image metadata operations on top.

mod match_engine;
mod mobile_engine;
mod multicolor_engine;
mod wine_engine;

pub use match_engine::MatchEngine;
pub use mobile_engine::MobileEngine;
pub use multicolor_engine::{ColorFormat, ColorSearchOptions, ExtractOptions, MulticolorEngine};
pub use wine_engine::WineEngine;

use crate::error::{Error, Result};
use crate::image::Image;
use crate::multipart::MessageBuilder;
use crate::request::ApiRequest;
use crate::response::ServiceResponse;

/// Optional parameters for the `search` operation.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Offset into the result list.
    pub offset: Option<u32>,
    /// Maximum number of matches to return.
    pub limit: Option<u32>,
    /// Minimum match score (0–100) for a result to be included.
    pub min_score: Option<u8>,
    /// Also try matching the horizontally flipped query image.
    pub check_horizontal_flip: Option<bool>,
}

impl SearchOptions {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_opt(&mut params, "offset", self.offset);
        push_opt(&mut params, "limit", self.limit);
        push_opt(&mut params, "min_score", self.min_score);
        push_opt(&mut params, "check_horizontal_flip", self.check_horizontal_flip);
        params
    }
}

/// Optional parameters for the `compare` operation.
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Minimum match score (0–100) for the pair to be reported.
    pub min_score: Option<u8>,
    /// Also try matching the horizontally flipped image.
    pub check_horizontal_flip: Option<bool>,
}

impl CompareOptions {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_opt(&mut params, "min_score", self.min_score);
        push_opt(&mut params, "check_horizontal_flip", self.check_horizontal_flip);
        params
    }
}

/// Optional paging parameters for the `list` operation.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl ListOptions {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_opt(&mut params, "offset", self.offset);
        push_opt(&mut params, "limit", self.limit);
        params
    }
}

fn push_opt(
    params: &mut Vec<(&'static str, String)>,
    name: &'static str,
    value: Option<impl std::fmt::Display>,
) {
    if let Some(value) = value {
        params.push((name, value.to_string()));
    }
}

/// The collection operations shared by every engine.
///
/// Implementors only supply [`CollectionApi::request`]; all operations
/// are provided. Image-upload variants POST a multipart body; URL and
/// filepath variants GET with query parameters.
pub trait CollectionApi {
    /// The request facade bound to this engine's service endpoint.
    fn request(&self) -> &ApiRequest;

    /// Check that the service is up and the credentials are accepted.
    fn ping(&self) -> Result<ServiceResponse> {
        self.request().get("ping", &[])
    }

    /// Number of images currently in the collection.
    fn count(&self) -> Result<ServiceResponse> {
        self.request().get("count", &[])
    }

    /// List the filepaths stored in the collection.
    fn list(&self, options: &ListOptions) -> Result<ServiceResponse> {
        self.request().get("list", &options.params())
    }

    /// Upload a file-backed image to the collection.
    ///
    /// The image's collection filepath, when set, names the destination;
    /// otherwise the service derives one from the uploaded filename.
    fn add_image(&self, image: &Image) -> Result<ServiceResponse> {
        let mut message = MessageBuilder::new();
        message.add_image("image", image.clone())?;
        if let Some(filepath) = image.collection_filepath() {
            message.add_field("filepath", filepath)?;
        }
        self.request().post("add", &message)
    }

    /// Add an image to the collection by its remote URL.
    fn add_url(&self, image: &Image) -> Result<ServiceResponse> {
        let url = image
            .url()
            .ok_or_else(|| Error::Construction("image has no URL to add by".into()))?;
        let mut message = MessageBuilder::new();
        message.add_field("url", url)?;
        if let Some(filepath) = image.collection_filepath() {
            message.add_field("filepath", filepath)?;
        }
        self.request().post("add", &message)
    }

    /// Remove an image from the collection by its filepath.
    fn delete(&self, filepath: &str) -> Result<ServiceResponse> {
        let mut message = MessageBuilder::new();
        message.add_field("filepath", filepath)?;
        self.request().post("delete", &message)
    }

    /// Search the collection with an uploaded query image.
    fn search_image(&self, image: &Image, options: &SearchOptions) -> Result<ServiceResponse> {
        let mut message = MessageBuilder::new();
        message.add_image("image", image.clone())?;
        for (name, value) in options.params() {
            message.add_field(name, value)?;
        }
        self.request().post("search", &message)
    }

    /// Search the collection with a query image fetched from a URL.
    fn search_url(&self, url: &str, options: &SearchOptions) -> Result<ServiceResponse> {
        let mut params = vec![("url", url.to_string())];
        params.extend(options.params());
        self.request().get("search", &params)
    }

    /// Search the collection with an image it already stores.
    fn search_filepath(&self, filepath: &str, options: &SearchOptions) -> Result<ServiceResponse> {
        let mut params = vec![("filepath", filepath.to_string())];
        params.extend(options.params());
        self.request().get("search", &params)
    }

    /// Compare two uploaded images directly against each other.
    fn compare_images(
        &self,
        image1: &Image,
        image2: &Image,
        options: &CompareOptions,
    ) -> Result<ServiceResponse> {
        let mut message = MessageBuilder::new();
        message.add_image("image1", image1.clone())?;
        message.add_image("image2", image2.clone())?;
        for (name, value) in options.params() {
            message.add_field(name, value)?;
        }
        self.request().post("compare", &message)
    }

    /// Compare two images fetched from URLs.
    fn compare_urls(
        &self,
        url1: &str,
        url2: &str,
        options: &CompareOptions,
    ) -> Result<ServiceResponse> {
        let mut params = vec![("url1", url1.to_string()), ("url2", url2.to_string())];
        params.extend(options.params());
        self.request().get("compare", &params)
    }
}
