//! # pixmatch
//!
//! Client SDK for the PixMatch image-matching web services — visual search,
//! image compare, hosted collection management, per-image metadata, and
//! color extraction, exposed as typed blocking method calls.
//!
//! ## Quick Start
//!
//! Every engine wraps the same REST surface: construct it with the service
//! base URL (plus credentials if your account uses basic auth) and call the
//! operations directly. Binary uploads are serialized for you as
//! multipart/form-data.
//!
//! ```rust,no_run
//! use pixmatch::{CollectionApi, Image, MatchEngine, SearchOptions};
//!
//! fn main() -> pixmatch::Result<()> {
//!     let engine = MatchEngine::with_credentials(
//!         "http://matchengine.example.com/rest/",
//!         "account",
//!         "secret",
//!     )?;
//!
//!     // Index an image under a collection filepath.
//!     let image = Image::from_file("photos/poster.jpg")?
//!         .with_collection_filepath("campaigns/poster.jpg");
//!     engine.add_image(&image)?;
//!
//!     // Search with a query photo.
//!     let query = Image::from_file("scans/poster-photo.jpg")?;
//!     let resp = engine.search_image(
//!         &query,
//!         &SearchOptions {
//!             min_score: Some(30),
//!             check_horizontal_flip: Some(true),
//!             ..Default::default()
//!         },
//!     )?;
//!
//!     for entry in &resp.result {
//!         println!("{} scored {}", entry["filepath"], entry["score"]);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! The endpoint wrappers are thin. For endpoints this crate does not wrap
//! (or for a new service revision), drive the request facade and message
//! builder yourself:
//!
//! ```rust,no_run
//! use pixmatch::{ApiRequest, Image, MessageBuilder};
//!
//! # fn example() -> pixmatch::Result<()> {
//! let request = ApiRequest::new("http://matchengine.example.com/rest/")?;
//!
//! let mut message = MessageBuilder::new();
//! message.add_field("limit", 10)?;
//! message.add_image("image", Image::from_file("query.jpg")?)?;
//!
//! let resp = request.post("search", &message)?;
//! println!("status: {:?}", resp.status);
//! # Ok(())
//! # }
//! ```
//!
//! ## Engines
//!
//! | Engine | Service |
//! |--------|---------|
//! | [`MatchEngine`] | General duplicate/modified-copy matching |
//! | [`MobileEngine`] | Matching photos taken with phone cameras |
//! | [`WineEngine`] | Wine bottle label matching |
//! | [`MulticolorEngine`] | Color search, color extraction, metadata |
//!
//! All engines share the collection operations of [`CollectionApi`];
//! [`MulticolorEngine`] adds the color and metadata endpoints on top.
//!
//! ## Errors
//!
//! Every failure is a [`Error`] with a [`kind`](Error::kind) of
//! `Construction`, `Build`, `Transport`, or `Parse`. Nothing is retried
//! internally. The crate logs through the [`log`] facade and installs no
//! logger; wire up whichever logger the host application uses.
//!
//! ## Modules
//!
//! - [`engine`] — per-service typed clients
//! - [`image`] — the image value (file-backed bytes or remote URL)
//! - [`multipart`] — multipart/form-data message construction
//! - [`request`] — the request facade joining messages to the transport
//! - [`response`] — the shared JSON response envelope
//! - [`transport`] — blocking GET/POST with optional basic auth
//! - [`error`] — the crate error type

pub mod engine;
pub mod error;
pub mod image;
pub mod multipart;
pub mod request;
pub mod response;
pub mod transport;

pub use engine::{
    CollectionApi, ColorFormat, ColorSearchOptions, CompareOptions, ExtractOptions, ListOptions,
    MatchEngine, MobileEngine, MulticolorEngine, SearchOptions, WineEngine,
};
pub use error::{Error, ErrorKind, Result};
pub use image::Image;
pub use multipart::MessageBuilder;
pub use request::ApiRequest;
pub use response::{ResponseStatus, ServiceResponse};
