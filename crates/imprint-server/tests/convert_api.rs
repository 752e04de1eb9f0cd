// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end tests for POST /api/pdf/convert.

use std::io::Cursor;

use axum::http::{StatusCode, header};
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use serde::Deserialize;

use imprint_core::{PageGeometry, ServerConfig};
use imprint_document::{ImagePdfConverter, PdfReader};

const CONVERT: &str = "/api/pdf/convert";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
}

fn test_server(config: ServerConfig) -> TestServer {
    TestServer::new(imprint_server::router(ImagePdfConverter::new(), &config)).unwrap()
}

fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

fn solid_rgb(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([10, 120, 240])))
}

fn file_form(bytes: Vec<u8>, file_name: &str, mime: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(bytes).file_name(file_name).mime_type(mime),
    )
}

fn page_geometry(pdf: &[u8]) -> PageGeometry {
    let reader = PdfReader::from_bytes(pdf).unwrap();
    assert_eq!(reader.page_count(), 1);
    reader.page_geometry(1).unwrap()
}

#[tokio::test]
async fn png_upload_returns_pdf_attachment() {
    let server = test_server(ServerConfig::default());
    let png = encode(&solid_rgb(100, 50), ImageFormat::Png);

    let response = server
        .post(CONVERT)
        .multipart(file_form(png, "photo.png", "image/png"))
        .await;

    response.assert_status_ok();
    let headers = response.headers();
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=converted.pdf"
    );

    let body = response.as_bytes();
    assert!(!body.is_empty());
    assert!(page_geometry(body).approx_eq(&PageGeometry::from_pixels(100, 50), 0.01));
}

#[tokio::test]
async fn jpeg_and_png_of_same_size_give_same_page() {
    let server = test_server(ServerConfig::default());
    let img = solid_rgb(64, 128);

    let png = server
        .post(CONVERT)
        .multipart(file_form(encode(&img, ImageFormat::Png), "a.png", "image/png"))
        .await;
    let jpeg = server
        .post(CONVERT)
        .multipart(file_form(encode(&img, ImageFormat::Jpeg), "a.jpg", "image/jpeg"))
        .await;

    png.assert_status_ok();
    jpeg.assert_status_ok();
    assert!(page_geometry(png.as_bytes()).approx_eq(&page_geometry(jpeg.as_bytes()), 0.001));
}

#[tokio::test]
async fn large_photo_keeps_every_pixel() {
    let server = test_server(ServerConfig::default());
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(1200, 900, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 200])
    }));

    let response = server
        .post(CONVERT)
        .multipart(file_form(encode(&img, ImageFormat::Png), "photo.png", "image/png"))
        .await;

    response.assert_status_ok();
    let reader = PdfReader::from_bytes(response.as_bytes()).unwrap();
    let images = reader.page_images(1).unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!((images[0].width, images[0].height), (1200, 900));
    assert_eq!(images[0].color_space.as_deref(), Some("DeviceRGB"));
}

#[tokio::test]
async fn transparent_png_is_converted() {
    let server = test_server(ServerConfig::default());
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(30, 20, Rgba([255, 0, 0, 64])));

    let response = server
        .post(CONVERT)
        .multipart(file_form(encode(&img, ImageFormat::Png), "t.png", "image/png"))
        .await;

    response.assert_status_ok();
    assert!(page_geometry(response.as_bytes()).approx_eq(&PageGeometry::from_pixels(30, 20), 0.01));
}

#[tokio::test]
async fn declared_content_type_is_not_checked() {
    let server = test_server(ServerConfig::default());
    let png = encode(&solid_rgb(5, 5), ImageFormat::Png);

    let response = server
        .post(CONVERT)
        .multipart(file_form(png, "blob.bin", "application/octet-stream"))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn extra_fields_are_ignored() {
    let server = test_server(ServerConfig::default());
    let png = encode(&solid_rgb(9, 4), ImageFormat::Png);

    let form = MultipartForm::new()
        .add_text("comment", "please convert")
        .add_part("file", Part::bytes(png).file_name("x.png"));
    let response = server.post(CONVERT).multipart(form).await;

    response.assert_status_ok();
}

#[tokio::test]
async fn missing_file_field_is_bad_request() {
    let server = test_server(ServerConfig::default());

    let response = server
        .post(CONVERT)
        .multipart(MultipartForm::new().add_text("image", "not here"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<ErrorBody>().code, "MISSING_FILE");
}

#[tokio::test]
async fn empty_file_is_bad_request() {
    let server = test_server(ServerConfig::default());

    let response = server
        .post(CONVERT)
        .multipart(file_form(Vec::new(), "empty.png", "image/png"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<ErrorBody>().code, "EMPTY_FILE");
}

#[tokio::test]
async fn undecodable_file_is_bad_request() {
    let server = test_server(ServerConfig::default());

    let response = server
        .post(CONVERT)
        .multipart(file_form(
            b"this is plain text, not an image".to_vec(),
            "notes.png",
            "image/png",
        ))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_ne!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(response.json::<ErrorBody>().code, "DECODE_FAILED");
}

#[tokio::test]
async fn truncated_png_is_bad_request() {
    let server = test_server(ServerConfig::default());
    let mut png = encode(&solid_rgb(50, 50), ImageFormat::Png);
    png.truncate(16);

    let response = server
        .post(CONVERT)
        .multipart(file_form(png, "cut.png", "image/png"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<ErrorBody>().code, "DECODE_FAILED");
}

#[tokio::test]
async fn non_multipart_body_is_rejected() {
    let server = test_server(ServerConfig::default());

    let response = server.post(CONVERT).text("hello").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn configured_upload_limit_is_enforced() {
    let server = test_server(ServerConfig {
        max_upload_bytes: Some(1024),
        ..ServerConfig::default()
    });

    let response = server
        .post(CONVERT)
        .multipart(file_form(vec![0u8; 8 * 1024], "big.png", "image/png"))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn only_post_is_routed() {
    let server = test_server(ServerConfig::default());

    server
        .get(CONVERT)
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
