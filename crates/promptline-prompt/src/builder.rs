//! Turns a semantic request into a structured message list.
//!
//! Two payload shapes are supported:
//!
//! * **Text** – wrapped into a single user turn, verbatim.
//! * **Vision** – one user turn carrying an instructional text block plus the
//!   image embedded as a `data:<media-type>;base64,…` URI, the transportable
//!   inline representation vision-capable chat APIs accept.
//!
//! [`build`] is a pure function with no side effects.  It fails only on a
//! malformed payload (empty text, missing instruction, missing image bytes),
//! signalled as a [`BuildError`] whose [`BuildError::kind`] is always
//! [`FailureKind::InvalidPayload`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use promptline_core::generic::{ContentPart, FailureKind, ImageUrl, Turn};
use thiserror::Error;

/// Input accepted by [`build`].
#[derive(Debug, Clone)]
pub enum PromptPayload {
    /// A plain user message.
    Text { content: String },
    /// An instruction plus an inline image, delivered as one user turn.
    Vision {
        instruction: String,
        image: ImageSource,
    },
}

impl PromptPayload {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn vision(instruction: impl Into<String>, image: ImageSource) -> Self {
        Self::Vision {
            instruction: instruction.into(),
            image,
        }
    }
}

/// Media types accepted for inline images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMediaType {
    Jpeg,
    Png,
}

impl ImageMediaType {
    pub fn mime(&self) -> &'static str {
        match self {
            ImageMediaType::Jpeg => "image/jpeg",
            ImageMediaType::Png => "image/png",
        }
    }

    /// Guess the media type from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageMediaType::Jpeg),
            "png" => Some(ImageMediaType::Png),
            _ => None,
        }
    }
}

/// An image held as its Base64 payload, ready for data-URI embedding.
///
/// Keeping the encoded form (rather than raw bytes) lets the same value move
/// through a JSON pipeline state without re-encoding on every hop.
#[derive(Debug, Clone)]
pub struct ImageSource {
    media_type: ImageMediaType,
    encoded: String,
}

impl ImageSource {
    /// Encode raw image bytes.
    pub fn from_bytes(media_type: ImageMediaType, bytes: &[u8]) -> Self {
        Self {
            media_type,
            encoded: STANDARD.encode(bytes),
        }
    }

    /// Wrap an already Base64-encoded payload.
    pub fn from_base64(media_type: ImageMediaType, encoded: impl Into<String>) -> Self {
        Self {
            media_type,
            encoded: encoded.into(),
        }
    }

    pub fn media_type(&self) -> ImageMediaType {
        self.media_type
    }

    pub fn base64(&self) -> &str {
        &self.encoded
    }

    pub fn is_empty(&self) -> bool {
        self.encoded.is_empty()
    }

    /// Render as an inline `data:` URI.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type.mime(), self.encoded)
    }
}

/// Malformed payload handed to [`build`].  Caller’s fault, 4xx-equivalent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("text payload is empty")]
    EmptyText,

    #[error("vision payload has no instruction text")]
    EmptyInstruction,

    #[error("vision payload has no image data")]
    EmptyImage,
}

impl BuildError {
    pub fn kind(&self) -> FailureKind {
        FailureKind::InvalidPayload
    }
}

/// Build the message list for one model call.
///
/// * `Text` payloads produce exactly one user turn whose content equals the
///   payload string.
/// * `Vision` payloads produce one user turn with a text part followed by an
///   `image_url` part holding the data URI.
pub fn build(payload: PromptPayload) -> Result<Vec<Turn>, BuildError> {
    match payload {
        PromptPayload::Text { content } => {
            if content.is_empty() {
                return Err(BuildError::EmptyText);
            }
            Ok(vec![Turn::user(content)])
        }
        PromptPayload::Vision { instruction, image } => {
            if instruction.is_empty() {
                return Err(BuildError::EmptyInstruction);
            }
            if image.is_empty() {
                return Err(BuildError::EmptyImage);
            }
            Ok(vec![Turn::user_parts(vec![
                ContentPart::Text { text: instruction },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image.to_data_uri(),
                    },
                },
            ])])
        }
    }
}
