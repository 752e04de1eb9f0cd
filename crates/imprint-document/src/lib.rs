// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// imprint-document — Wrap a raster image in a single-page PDF at native size,
// and inspect the resulting documents.

pub mod convert;
pub mod pdf;

pub use convert::ImagePdfConverter;
pub use pdf::reader::PdfReader;
pub use pdf::writer::PdfWriter;
