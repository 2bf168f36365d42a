//! multipart/form-data message construction.
//!
//! The PixMatch services take their POST parameters as a single
//! multipart/form-data body mixing text fields (search options, filepaths,
//! metadata documents) with raw image payloads. [`MessageBuilder`]
//! accumulates both and serializes them with [`MessageBuilder::to_bytes`];
//! the boundary token is generated per message and fed to the transport's
//! `Content-Type` header.
//!
//! The wire layout is fixed: every text field renders as
//!
//! ```text
//! --boundary\r\n
//! Content-Disposition: form-data; name="X";\r\n
//! \r\n
//! <value>\r\n
//! ```
//!
//! every image part adds a `filename` and a `Content-Type: image/<ext>`
//! header with the bytes inserted verbatim, and the body closes with
//! `--boundary--`.

use std::collections::BTreeMap;
use std::fmt::Display;

use crate::error::{Error, Result};
use crate::image::Image;

/// Accumulates named text fields and image attachments and serializes
/// them into one multipart/form-data byte payload.
///
/// A builder is request-scoped: construct, populate, serialize once,
/// discard. Field names must be unique across text fields and images
/// combined; a duplicate name fails without mutating prior state.
///
/// # Example
///
/// ```rust,no_run
/// use pixmatch::{Image, MessageBuilder};
///
/// # fn example() -> pixmatch::Result<()> {
/// let mut message = MessageBuilder::new();
/// message.add_field("limit", 20)?;
/// message.add_field("check_horizontal_flip", true)?;
/// message.add_image("image", Image::from_file("query.jpg")?)?;
///
/// let body = message.to_bytes()?;
/// let boundary = message.boundary();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MessageBuilder {
    boundary: String,
    fields: BTreeMap<String, String>,
    images: BTreeMap<String, Image>,
}

impl MessageBuilder {
    /// Create an empty builder with a freshly generated boundary token.
    pub fn new() -> Self {
        // A hyphenless v4 UUID cannot collide with field content in
        // practice and is unique per message.
        Self {
            boundary: uuid::Uuid::new_v4().simple().to_string(),
            fields: BTreeMap::new(),
            images: BTreeMap::new(),
        }
    }

    /// The boundary token delimiting the parts of this message.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// `true` if no fields or images have been added.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.images.is_empty()
    }

    /// Add a named text field. Accepts anything `Display` (strings,
    /// integers, booleans, floats).
    ///
    /// Fails with [`Error::Construction`] if the name is already used by
    /// a text field or an image.
    pub fn add_field(&mut self, name: &str, value: impl Display) -> Result<()> {
        self.check_name(name)?;
        self.fields.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Add a named image part. The image must be file-backed by the time
    /// the message is serialized; URL references are passed as text
    /// fields instead.
    ///
    /// Fails with [`Error::Construction`] if the name is already used.
    pub fn add_image(&mut self, name: &str, image: Image) -> Result<()> {
        self.check_name(name)?;
        self.images.insert(name.to_string(), image);
        Ok(())
    }

    fn check_name(&self, name: &str) -> Result<()> {
        if self.fields.contains_key(name) || self.images.contains_key(name) {
            log::error!("Multipart field name {name:?} already used in this message");
            return Err(Error::Construction(format!(
                "field name {name:?} is already used in this message"
            )));
        }
        Ok(())
    }

    /// Serialize the accumulated parts into the final body.
    ///
    /// Text fields come first (in name order), then image parts, then the
    /// closing `--boundary--` line. Textual parts are UTF-8; image bytes
    /// are inserted verbatim.
    ///
    /// Fails with [`Error::Build`] if an image part has no binary content
    /// (URL-backed) or its filename lacks an extension.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut body = Vec::new();

        for (name, value) in &self.fields {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\";\r\n\r\n{}\r\n",
                    self.boundary, name, value
                )
                .as_bytes(),
            );
        }

        for (name, image) in &self.images {
            let filename = image.filename().ok_or_else(|| {
                log::error!("Image part {name:?} has no local file backing it");
                Error::Build(format!("image part {name:?} has no local file backing it"))
            })?;
            let content_type = content_type_for(filename)?;
            let bytes = image.bytes().ok_or_else(|| {
                Error::Build(format!("image part {name:?} has no binary content"))
            })?;

            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    self.boundary, name, filename, content_type
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }

        body.extend_from_slice(format!("--{}--", self.boundary).as_bytes());
        Ok(body)
    }
}

impl Default for MessageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the `image/<ext>` content type from a filename.
///
/// The extension is lower-cased and `jpg` is normalized to `jpeg`.
/// A filename without an extension is a build error.
fn content_type_for(filename: &str) -> Result<String> {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .ok_or_else(|| {
            log::error!("Image filename {filename:?} has no extension");
            Error::Build(format!("image filename {filename:?} has no extension"))
        })?;

    let ext = ext.to_lowercase();
    let ext = if ext == "jpg" { "jpeg".to_string() } else { ext };
    Ok(format!("image/{ext}"))
}
