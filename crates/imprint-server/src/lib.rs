// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// imprint-server — HTTP surface for image → PDF conversion.

pub mod error;
pub mod routes;

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;

use imprint_core::ServerConfig;
use imprint_document::ImagePdfConverter;

pub use error::ApiError;

/// Build the application router.
///
/// Called once at startup; the resulting router is immutable and shared by
/// all connections.
pub fn router(converter: ImagePdfConverter, config: &ServerConfig) -> Router {
    let mut pdf = Router::new().route("/convert", post(routes::convert_image));
    if let Some(limit) = config.max_upload_bytes {
        pdf = pdf.layer(DefaultBodyLimit::max(limit));
    }

    Router::new()
        .nest("/api/pdf", pdf)
        .layer(TraceLayer::new_for_http())
        .with_state(converter)
}
