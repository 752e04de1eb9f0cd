// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image → PDF conversion.
//
// Decoding is delegated entirely to the `image` crate's format sniffing; there
// is no allow-list of content types. Anything it cannot decode is a client
// error, anything that goes wrong afterwards is ours.

use imprint_core::DocumentBytes;
use imprint_core::error::ConversionError;
use tracing::{info, instrument, warn};

use crate::pdf::writer::PdfWriter;

/// Stateless image-to-PDF converter.
///
/// Holds no fields, so a single value can be shared by every request without
/// synchronisation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImagePdfConverter;

impl ImagePdfConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert encoded image bytes into a single-page PDF whose page matches
    /// the image's pixel dimensions one-to-one in points.
    #[instrument(skip_all, fields(input_bytes = image.len()))]
    pub fn convert(&self, image: &[u8]) -> Result<DocumentBytes, ConversionError> {
        if image.is_empty() {
            return Err(ConversionError::DecodeFailure("no image data".into()));
        }

        let decoded = ::image::load_from_memory(image).map_err(|err| {
            warn!(error = %err, "Upload is not a decodable image");
            ConversionError::DecodeFailure(err.to_string())
        })?;

        let (width, height) = (decoded.width(), decoded.height());
        let pdf = PdfWriter::new().create_native_size(decoded)?;

        info!(width, height, output_bytes = pdf.len(), "Image converted to PDF");
        Ok(DocumentBytes::new(pdf))
    }
}
