// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — place a decoded image on a page of exactly its own size using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use image::DynamicImage;
use imprint_core::error::ConversionError;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument};

/// At 72 DPI one image pixel occupies exactly one PDF point.
const NATIVE_DPI: f32 = 72.0;

const DEFAULT_TITLE: &str = "Converted Image";

/// Builds single-page PDFs whose page is the size of the image it carries.
///
/// A writer holds no document state between calls; each call builds and
/// serialises a fresh `PdfDocument`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter;

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Create a one-page PDF showing `image` at 1:1 scale.
    ///
    /// The page is `width × height` points with no margin, and the image is
    /// drawn from the origin across the full page.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn create_native_size(&self, image: DynamicImage) -> Result<Vec<u8>, ConversionError> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(ConversionError::EncodeFailure(format!(
                "image has no pixels ({width}x{height})"
            )));
        }

        let raw = raw_image(image)?;

        let mut doc = PdfDocument::new(DEFAULT_TITLE);
        let xobject_id = doc.add_image(&raw);

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                scale_x: Some(1.0),
                scale_y: Some(1.0),
                dpi: Some(NATIVE_DPI),
                rotate: None,
            },
        }];

        let page_w = Mm::from(Pt(width as f32));
        let page_h = Mm::from(Pt(height as f32));
        doc.with_pages(vec![PdfPage::new(page_w, page_h, ops)]);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        // The default options downscale large images and collapse near-grey
        // RGB to DeviceGray; pixels must reach the file unchanged.
        let options = PdfSaveOptions {
            image_optimization: None,
            ..Default::default()
        };
        let output = doc.save(&options, &mut warnings);

        if output.is_empty() {
            return Err(ConversionError::EncodeFailure(
                "PDF serialisation produced no output".into(),
            ));
        }

        info!(
            width,
            height,
            output_bytes = output.len(),
            warnings = warnings.len(),
            "Image PDF created"
        );

        Ok(output)
    }
}

/// Hand the decoded pixels to printpdf in a layout it accepts as-is where
/// possible. Alpha is kept so the encoder can emit a soft mask.
fn raw_image(image: DynamicImage) -> Result<RawImage, ConversionError> {
    let width = image.width() as usize;
    let height = image.height() as usize;

    let (pixels, data_format, channels) = match image {
        DynamicImage::ImageLuma8(gray) => (gray.into_raw(), RawImageFormat::R8, 1),
        DynamicImage::ImageRgb8(rgb) => (rgb.into_raw(), RawImageFormat::RGB8, 3),
        DynamicImage::ImageRgba8(rgba) => (rgba.into_raw(), RawImageFormat::RGBA8, 4),
        other if other.color().has_alpha() => {
            (other.to_rgba8().into_raw(), RawImageFormat::RGBA8, 4)
        }
        other if !other.color().has_color() => {
            (other.to_luma8().into_raw(), RawImageFormat::R8, 1)
        }
        other => (other.to_rgb8().into_raw(), RawImageFormat::RGB8, 3),
    };

    debug!(?data_format, "Pixel layout chosen");

    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| {
            ConversionError::EncodeFailure(format!("image {width}x{height} is too large"))
        })?;
    if pixels.len() != expected {
        return Err(ConversionError::EncodeFailure(format!(
            "pixel buffer holds {} bytes, expected {expected}",
            pixels.len()
        )));
    }

    Ok(RawImage {
        pixels: RawImageData::U8(pixels),
        width,
        height,
        data_format,
        tag: Vec::new(),
    })
}
