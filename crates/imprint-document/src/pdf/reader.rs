// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — inspect the page tree of a generated document using the
// `lopdf` crate.

use lopdf::{Dictionary, Document, Object, ObjectId};
use imprint_core::error::{ImprintError, Result};
use imprint_core::{EmbeddedImage, PageGeometry};
use tracing::{debug, instrument};

/// Guard against cyclic /Parent chains in malformed files.
const MAX_PARENT_DEPTH: usize = 32;

/// Read-only view over a PDF held in memory.
pub struct PdfReader {
    document: Document,
}

impl PdfReader {
    /// Create a reader from raw PDF bytes.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            ImprintError::PdfInspect(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Page size (1-indexed) from its /MediaBox, honouring inheritance.
    pub fn page_geometry(&self, page_number: u32) -> Result<PageGeometry> {
        let page_id = self.page_id(page_number)?;
        let media_box = self.inherited_attribute(page_id, b"MediaBox")?;
        let values = media_box
            .as_array()
            .map_err(|err| ImprintError::PdfInspect(format!("/MediaBox is not an array: {err}")))?;

        if values.len() != 4 {
            return Err(ImprintError::PdfInspect(format!(
                "/MediaBox has {} entries, expected 4",
                values.len()
            )));
        }

        let mut coords = [0.0f32; 4];
        for (slot, value) in coords.iter_mut().zip(values) {
            *slot = value.as_float().map_err(|err| {
                ImprintError::PdfInspect(format!("/MediaBox entry is not a number: {err}"))
            })?;
        }
        let [x0, y0, x1, y1] = coords;

        Ok(PageGeometry {
            width_pt: (x1 - x0).abs(),
            height_pt: (y1 - y0).abs(),
        })
    }

    /// Image XObjects referenced from a page's resources (1-indexed).
    pub fn page_images(&self, page_number: u32) -> Result<Vec<EmbeddedImage>> {
        let page_id = self.page_id(page_number)?;
        let resources = self.inherited_attribute(page_id, b"Resources")?;
        let resources = self.resolve_dictionary(resources)?;

        let xobjects = match resources.get(b"XObject") {
            Ok(obj) => self.resolve_dictionary(obj)?,
            Err(_) => return Ok(Vec::new()),
        };

        let mut images = Vec::new();
        for (_, entry) in xobjects.iter() {
            let stream = self
                .resolve(entry)?
                .as_stream()
                .map_err(|err| ImprintError::PdfInspect(format!("XObject is not a stream: {err}")))?;

            let is_image = stream
                .dict
                .get(b"Subtype")
                .and_then(Object::as_name)
                .map(|name| name == b"Image")
                .unwrap_or(false);
            if !is_image {
                continue;
            }

            let color_space = stream
                .dict
                .get(b"ColorSpace")
                .and_then(Object::as_name)
                .ok()
                .map(|name| String::from_utf8_lossy(name).into_owned());

            images.push(EmbeddedImage {
                width: self.dimension(&stream.dict, b"Width")?,
                height: self.dimension(&stream.dict, b"Height")?,
                color_space,
            });
        }

        Ok(images)
    }

    // -- Helpers ------------------------------------------------------------

    fn page_id(&self, page_number: u32) -> Result<ObjectId> {
        let pages = self.document.get_pages();
        pages.get(&page_number).copied().ok_or_else(|| {
            ImprintError::PdfInspect(format!(
                "page {} not found (document has {} pages)",
                page_number,
                pages.len()
            ))
        })
    }

    /// Look up `key` on the page, then on its ancestors in the page tree.
    fn inherited_attribute(&self, page_id: ObjectId, key: &[u8]) -> Result<&Object> {
        let mut node_id = page_id;
        for _ in 0..MAX_PARENT_DEPTH {
            let node = self.document.get_dictionary(node_id).map_err(|err| {
                ImprintError::PdfInspect(format!("page tree node {node_id:?}: {err}"))
            })?;
            if let Ok(value) = node.get(key) {
                return Ok(value);
            }
            node_id = node
                .get(b"Parent")
                .and_then(Object::as_reference)
                .map_err(|_| {
                    ImprintError::PdfInspect(format!(
                        "/{} missing from page and its ancestors",
                        String::from_utf8_lossy(key)
                    ))
                })?;
        }
        Err(ImprintError::PdfInspect("page tree too deep".into()))
    }

    fn resolve<'a>(&'a self, object: &'a Object) -> Result<&'a Object> {
        match object {
            Object::Reference(id) => self.document.get_object(*id).map_err(|err| {
                ImprintError::PdfInspect(format!("dangling reference {id:?}: {err}"))
            }),
            other => Ok(other),
        }
    }

    fn resolve_dictionary<'a>(&'a self, object: &'a Object) -> Result<&'a Dictionary> {
        self.resolve(object)?
            .as_dict()
            .map_err(|err| ImprintError::PdfInspect(format!("expected a dictionary: {err}")))
    }

    fn dimension(&self, dict: &Dictionary, key: &[u8]) -> Result<u32> {
        let value = dict
            .get(key)
            .map_err(|err| ImprintError::PdfInspect(format!("image XObject: {err}")))?;
        let value = self
            .resolve(value)?
            .as_i64()
            .map_err(|err| ImprintError::PdfInspect(format!("image dimension: {err}")))?;
        u32::try_from(value)
            .map_err(|_| ImprintError::PdfInspect(format!("image dimension out of range: {value}")))
    }
}
