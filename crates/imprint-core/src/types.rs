// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Imprint.

use serde::{Deserialize, Serialize};

/// An encoded single-page PDF produced by the converter.
///
/// The buffer is never mutated after construction; callers either read it or
/// take ownership of it with [`DocumentBytes::into_inner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentBytes(Vec<u8>);

impl DocumentBytes {
    /// MIME type for the `Content-Type` header.
    pub const MIME_TYPE: &'static str = "application/pdf";

    /// Filename offered to clients in `Content-Disposition`.
    pub const ATTACHMENT_FILENAME: &'static str = "converted.pdf";

    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    /// `Content-Disposition` value marking the document as a download.
    pub fn content_disposition() -> String {
        format!("attachment; filename={}", Self::ATTACHMENT_FILENAME)
    }
}

impl AsRef<[u8]> for DocumentBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Width and height of a page in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
}

impl PageGeometry {
    /// Page geometry for an image placed at one pixel per point.
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self {
            width_pt: width as f32,
            height_pt: height as f32,
        }
    }

    /// Compare with another geometry, allowing for encoder unit rounding.
    pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
        (self.width_pt - other.width_pt).abs() <= tolerance
            && (self.height_pt - other.height_pt).abs() <= tolerance
    }
}

/// An image XObject found in a page's resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedImage {
    /// Pixel width declared by the XObject.
    pub width: u32,
    /// Pixel height declared by the XObject.
    pub height: u32,
    /// `/ColorSpace` name (e.g. `DeviceRGB`), if given as a plain name.
    pub color_space: Option<String>,
}
