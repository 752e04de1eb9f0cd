// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion endpoint.
//
//   POST /api/pdf/convert   multipart/form-data, field `file`
//
// Each request is independent: read the upload, convert it on the blocking
// pool, and answer with the PDF as a download.

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use imprint_core::DocumentBytes;
use imprint_core::error::InputError;
use imprint_document::ImagePdfConverter;

use crate::error::ApiError;

/// Multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// POST /api/pdf/convert
pub async fn convert_image(
    State(converter): State<ImagePdfConverter>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let image = read_file_field(&mut multipart).await?;
    debug!(bytes = image.len(), "Upload received");

    // Decode and encode are CPU-bound; keep them off the async workers.
    let document = tokio::task::spawn_blocking(move || converter.convert(&image))
        .await
        .map_err(|err| ApiError::Internal(format!("conversion task failed: {err}")))??;

    Ok((
        [
            (header::CONTENT_TYPE, DocumentBytes::MIME_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                DocumentBytes::content_disposition(),
            ),
        ],
        document.into_inner(),
    )
        .into_response())
}

/// Return the bytes of the first `file` field; other fields are ignored.
async fn read_file_field(multipart: &mut Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            debug!(name = ?field.name(), "Ignoring multipart field");
            continue;
        }

        debug!(
            file_name = ?field.file_name(),
            content_type = ?field.content_type(),
            "Reading file field"
        );

        let data = field.bytes().await?;
        if data.is_empty() {
            return Err(InputError::EmptyFile.into());
        }
        return Ok(data);
    }

    tracing::warn!("No file field found in multipart upload");
    Err(InputError::MissingFile.into())
}
