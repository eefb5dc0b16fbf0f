//! HTTP implementation of [`FontServices`].

use bytes::Bytes;
use serde::Deserialize;

use super::{FilePayload, FontServices, GlyphUpload, ServiceEndpoints, file_name_of};
use crate::error::{NetworkError, Result};
use crate::http::{HttpClient, MultipartForm};
use deepscript_core::PerfSpan;
use deepscript_core::logging::targets;

/// Body returned by the segmentation endpoint.
#[derive(Debug, Deserialize)]
struct SegmentationResponse {
    processed_images: Vec<String>,
}

/// Talks to the segmentation, synthesis and rendering services over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteFontServices {
    client: HttpClient,
    endpoints: ServiceEndpoints,
}

impl RemoteFontServices {
    /// Create a client for the given endpoints.
    pub fn new(endpoints: ServiceEndpoints) -> Result<Self> {
        let client = HttpClient::new(endpoints.client_config())?;
        Ok(Self { client, endpoints })
    }

    /// The endpoints in use.
    pub fn endpoints(&self) -> &ServiceEndpoints {
        &self.endpoints
    }

    /// GET a URL and return the body of a successful response.
    async fn get_bytes(&self, url: &str, query: Option<(&str, &str)>) -> Result<Bytes> {
        let mut request = self.client.get(url);
        if let Some((key, value)) = query {
            request = request.query(key, value);
        }
        request
            .send()
            .await?
            .error_for_status_with_body()
            .await?
            .bytes()
            .await
    }

    /// POST a multipart form and return the body of a successful response.
    async fn post_form(&self, url: &str, form: MultipartForm) -> Result<Bytes> {
        self.client
            .post(url)
            .multipart(form)
            .await?
            .error_for_status_with_body()
            .await?
            .bytes()
            .await
    }
}

impl FontServices for RemoteFontServices {
    #[tracing::instrument(skip_all, target = "deepscript_net::services", fields(file = %image.file_name))]
    async fn segment_image(&self, image: FilePayload) -> Result<Vec<String>> {
        let _perf = PerfSpan::new("segment_image");
        let url = self.endpoints.segment_url()?;
        let form = MultipartForm::new().file_bytes(
            "image",
            image.bytes,
            image.file_name,
            Some(&image.mime_type),
        );

        let body = self.post_form(&url, form).await?;
        let response: SegmentationResponse = serde_json::from_slice(&body)?;
        tracing::info!(
            target: targets::SERVICES,
            glyphs = response.processed_images.len(),
            "segmentation finished"
        );
        Ok(response.processed_images)
    }

    #[tracing::instrument(skip_all, target = "deepscript_net::services", fields(reference = %reference))]
    async fn fetch_glyph_image(&self, reference: &str) -> Result<Bytes> {
        let url = self.endpoints.glyph_image_url()?;
        self.get_bytes(&url, Some(("path", reference))).await
    }

    #[tracing::instrument(skip_all, target = "deepscript_net::services", fields(glyphs = glyphs.len()))]
    async fn synthesize_font(&self, glyphs: Vec<GlyphUpload>) -> Result<Bytes> {
        let _perf = PerfSpan::new("synthesize_font");
        if glyphs.is_empty() {
            return Err(NetworkError::InvalidBody(
                "font synthesis needs at least one glyph".to_string(),
            ));
        }
        let url = self.endpoints.synthesis_url()?;

        // Names are sent after every image so that the i-th `names` field
        // always belongs to the i-th `images` field.
        let mut form = MultipartForm::new();
        let mut names = Vec::with_capacity(glyphs.len());
        for glyph in glyphs {
            form = form.file_bytes(
                "images",
                glyph.image.bytes,
                glyph.image.file_name,
                Some(&glyph.image.mime_type),
            );
            names.push(glyph.name);
        }
        for name in names {
            form = form.text("names", name);
        }

        let font = self.post_form(&url, form).await?;
        tracing::info!(target: targets::SERVICES, bytes = font.len(), "font synthesized");
        Ok(font)
    }

    #[tracing::instrument(skip_all, target = "deepscript_net::services", fields(chars = text.chars().count(), font = %font.file_name))]
    async fn render_document(&self, text: &str, font: FilePayload) -> Result<Bytes> {
        let _perf = PerfSpan::new("render_document");
        let url = self.endpoints.render_url()?;
        let form = MultipartForm::new().text("input_text", text).file_bytes(
            "fontfile",
            font.bytes,
            font.file_name,
            Some(&font.mime_type),
        );

        let document = self.post_form(&url, form).await?;
        tracing::info!(target: targets::SERVICES, bytes = document.len(), "document rendered");
        Ok(document)
    }

    #[tracing::instrument(skip_all, target = "deepscript_net::services", fields(path = %path))]
    async fn fetch_builtin_font(&self, path: &str) -> Result<Bytes> {
        let url = self.endpoints.asset_url(path)?;
        let bytes = self.get_bytes(&url, None).await?;
        tracing::debug!(
            target: targets::SERVICES,
            file = file_name_of(path),
            bytes = bytes.len(),
            "built-in font fetched"
        );
        Ok(bytes)
    }
}
