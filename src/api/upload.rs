use axum::{
    extract::{
        multipart::{Multipart, MultipartError, MultipartRejection},
        rejection::BytesRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorBody;

/// Form field the web client puts the label photo in.
pub const LABEL_FIELD: &str = "label";

const DEFAULT_MIME: &str = "image/jpeg";

/// Problems with what the client sent. Never reaches the provider.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("No image uploaded")]
    NoImage,
    #[error("Uploaded file is not an image ({0})")]
    NotAnImage(String),
    #[error("No text provided")]
    NoText,
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Malformed multipart upload: {0}")]
    Multipart(String),
    #[error("Upload too large")]
    TooLarge,
}

impl InputError {
    pub fn status(&self) -> StatusCode {
        match self {
            InputError::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for InputError {
    fn into_response(self) -> Response {
        log::warn!("⚠️ Rejected request: {}", self);
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<MultipartError> for InputError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            InputError::TooLarge
        } else {
            InputError::Multipart(e.body_text())
        }
    }
}

impl From<BytesRejection> for InputError {
    fn from(e: BytesRejection) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            InputError::TooLarge
        } else {
            InputError::MalformedBody(e.body_text())
        }
    }
}

impl From<MultipartRejection> for InputError {
    fn from(e: MultipartRejection) -> Self {
        InputError::Multipart(e.body_text())
    }
}

#[derive(Debug)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Pulls the label photo out of the form: the `label` file, or else the first file field.
/// Plain text fields are never taken as the image, even when named `label`.
pub async fn read_label_image(mut multipart: Multipart) -> Result<UploadedImage, InputError> {
    let mut first_file: Option<(Vec<u8>, Option<String>)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_none() {
            continue;
        }

        let is_label = field.name() == Some(LABEL_FIELD);
        if !is_label && first_file.is_some() {
            continue;
        }

        let mime = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?.to_vec();

        if is_label {
            return uploaded_image(bytes, mime);
        }
        first_file = Some((bytes, mime));
    }

    match first_file {
        Some((bytes, mime)) => uploaded_image(bytes, mime),
        None => Err(InputError::NoImage),
    }
}

fn uploaded_image(bytes: Vec<u8>, mime: Option<String>) -> Result<UploadedImage, InputError> {
    if bytes.is_empty() {
        return Err(InputError::NoImage);
    }

    let mime_type = match mime {
        None => DEFAULT_MIME.to_string(),
        Some(m) if m == "application/octet-stream" => DEFAULT_MIME.to_string(),
        Some(m) if m.starts_with("image/") => m,
        Some(m) => return Err(InputError::NotAnImage(m)),
    };

    Ok(UploadedImage { bytes, mime_type })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uploaded_image_mime_rules() {
        let png = uploaded_image(vec![1], Some("image/png".to_string())).unwrap();
        assert_eq!(png.mime_type, "image/png");

        let unknown = uploaded_image(vec![1], None).unwrap();
        assert_eq!(unknown.mime_type, "image/jpeg");

        let octet = uploaded_image(vec![1], Some("application/octet-stream".to_string())).unwrap();
        assert_eq!(octet.mime_type, "image/jpeg");

        assert!(matches!(
            uploaded_image(vec![1], Some("text/plain".to_string())),
            Err(InputError::NotAnImage(m)) if m == "text/plain"
        ));
        assert!(matches!(uploaded_image(Vec::new(), None), Err(InputError::NoImage)));
    }

    #[test]
    fn test_input_error_status() {
        assert_eq!(InputError::NoImage.status(), StatusCode::BAD_REQUEST);
        assert_eq!(InputError::TooLarge.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(InputError::NoImage.to_string(), "No image uploaded");
    }
}
