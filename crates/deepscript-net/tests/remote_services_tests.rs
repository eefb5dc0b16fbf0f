//! Integration tests for the HTTP font services against a mock server.

use bytes::Bytes;
use deepscript_net::NetworkError;
use deepscript_net::services::{
    FilePayload, FontServices, GlyphUpload, RemoteFontServices, ServiceEndpoints,
};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn services_for(server: &MockServer) -> RemoteFontServices {
    RemoteFontServices::new(ServiceEndpoints::single_host(server.uri()))
        .expect("Failed to build services")
}

fn glyph(name: &str, file: &str, byte: u8) -> GlyphUpload {
    GlyphUpload {
        name: name.to_string(),
        image: FilePayload::new(file, "image/png", vec![byte; 3]),
    }
}

#[tokio::test]
async fn test_segment_image_returns_references_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process-image"))
        .and(body_string_contains("name=\"image\""))
        .and(body_string_contains("filename=\"sample.jpg\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "processed_images": ["out/char_0.png", "out/char_1.png", "out/char_2.png"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let services = services_for(&server).await;
    let refs = services
        .segment_image(FilePayload::new("sample.jpg", "image/jpeg", vec![0xFFu8, 0xD8]))
        .await
        .unwrap();

    assert_eq!(
        refs,
        vec!["out/char_0.png", "out/char_1.png", "out/char_2.png"]
    );
}

#[tokio::test]
async fn test_segment_image_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process-image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"oops": 1})))
        .mount(&server)
        .await;

    let services = services_for(&server).await;
    let err = services
        .segment_image(FilePayload::new("sample.jpg", "image/jpeg", vec![1u8]))
        .await
        .unwrap_err();

    assert!(matches!(err, NetworkError::Json(_)));
}

#[tokio::test]
async fn test_segment_image_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process-image"))
        .respond_with(ResponseTemplate::new(500).set_body_string("No file uploaded"))
        .mount(&server)
        .await;

    let services = services_for(&server).await;
    let err = services
        .segment_image(FilePayload::new("sample.jpg", "image/jpeg", vec![1u8]))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "HTTP 500: No file uploaded");
}

#[tokio::test]
async fn test_fetch_glyph_image_passes_reference_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get-image"))
        .and(query_param("path", "out/char_1.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![9u8, 9]))
        .expect(1)
        .mount(&server)
        .await;

    let services = services_for(&server).await;
    let bytes = services.fetch_glyph_image("out/char_1.png").await.unwrap();
    assert_eq!(bytes, Bytes::from_static(&[9, 9]));
}

#[tokio::test]
async fn test_synthesize_font_keeps_images_and_names_aligned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-font"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"TTFDATA".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let services = services_for(&server).await;
    let font = services
        .synthesize_font(vec![
            glyph("A", "char_0.png", 1),
            glyph("b", "char_1.png", 2),
            glyph("7", "char_2.png", 3),
        ])
        .await
        .unwrap();
    assert_eq!(font.as_ref(), b"TTFDATA");

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).into_owned();

    let files: Vec<usize> = ["char_0.png", "char_1.png", "char_2.png"]
        .iter()
        .map(|f| body.find(&format!("filename=\"{f}\"")).unwrap())
        .collect();
    assert!(files.windows(2).all(|w| w[0] < w[1]));

    let names: Vec<&str> = body
        .split("name=\"names\"")
        .skip(1)
        .map(|part| part.trim_start().lines().next().unwrap_or("").trim())
        .collect();
    assert_eq!(names, vec!["A", "b", "7"]);
    assert_eq!(body.matches("name=\"images\"").count(), 3);
}

#[tokio::test]
async fn test_synthesize_font_needs_glyphs() {
    let server = MockServer::start().await;
    let services = services_for(&server).await;
    let err = services.synthesize_font(Vec::new()).await.unwrap_err();
    assert!(matches!(err, NetworkError::InvalidBody(_)));
}

#[tokio::test]
async fn test_render_document_sends_text_and_font() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/render"))
        .and(body_string_contains("name=\"input_text\""))
        .and(body_string_contains("Hello world"))
        .and(body_string_contains("name=\"fontfile\""))
        .and(body_string_contains("filename=\"CustomFont.ttf\""))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let services = services_for(&server).await;
    let pdf = services
        .render_document(
            "Hello world",
            FilePayload::new("CustomFont.ttf", "font/ttf", b"TTF".to_vec()),
        )
        .await
        .unwrap();

    assert!(pdf.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_fetch_builtin_font_resolves_against_assets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fonts/hand1.ttf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"FONT".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let services = services_for(&server).await;
    let font = services.fetch_builtin_font("/fonts/hand1.ttf").await.unwrap();
    assert_eq!(font.as_ref(), b"FONT");
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let endpoints = ServiceEndpoints {
        connect_timeout_secs: 1,
        timeout_secs: 2,
        ..ServiceEndpoints::single_host("http://127.0.0.1:9")
    };
    let services = RemoteFontServices::new(endpoints).unwrap();
    let err = services.fetch_glyph_image("x.png").await.unwrap_err();
    assert!(err.is_transport());
}
