// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Imprint.

use thiserror::Error;

/// Failure of the image-to-PDF conversion itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The uploaded bytes are not an image the decoder recognises.
    #[error("image could not be decoded: {0}")]
    DecodeFailure(String),

    /// Building or serialising the PDF failed.
    #[error("PDF could not be encoded: {0}")]
    EncodeFailure(String),
}

impl ConversionError {
    /// Whether the caller is at fault (bad upload) rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::DecodeFailure(_))
    }
}

/// Problems with the upload itself, detected before any conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("no file provided; upload the image in a form field named 'file'")]
    MissingFile,

    #[error("the uploaded file is empty")]
    EmptyFile,
}

/// Top-level error type for all Imprint operations.
#[derive(Debug, Error)]
pub enum ImprintError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("PDF inspection failed: {0}")]
    PdfInspect(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ImprintError>;
