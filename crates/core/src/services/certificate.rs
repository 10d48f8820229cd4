//! Volunteer certificates rendered by the external PDF service.

use std::sync::Arc;
use std::time::Duration;

use aaharsetu_common::{AppError, AppResult};
use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

/// Renders a certificate PDF for a name.
#[async_trait]
pub trait CertificateGenerator: Send + Sync {
    async fn generate(&self, name: &str) -> AppResult<Vec<u8>>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    name: &'a str,
}

/// Certificate service reached over HTTP at `{base_url}/generate`.
#[derive(Clone)]
pub struct HttpCertificateGenerator {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpCertificateGenerator {
    /// Create a certificate client with a bounded request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CertificateGenerator for HttpCertificateGenerator {
    async fn generate(&self, name: &str) -> AppResult<Vec<u8>> {
        let response = self
            .http_client
            .post(format!("{}/generate", self.base_url))
            .json(&GenerateRequest { name })
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Certificate service unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "Certificate service returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::ExternalService(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

/// Certificate service.
#[derive(Clone)]
pub struct CertificateService {
    generator: Arc<dyn CertificateGenerator>,
}

impl CertificateService {
    /// Create a new certificate service.
    #[must_use]
    pub fn new(generator: Arc<dyn CertificateGenerator>) -> Self {
        Self { generator }
    }

    /// Render a certificate for a volunteer.
    pub async fn issue(&self, volunteer_id: &str, name: &str) -> AppResult<Vec<u8>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }

        let pdf = self.generator.generate(name).await?;
        if pdf.is_empty() {
            return Err(AppError::ExternalService(
                "Certificate service returned an empty document".to_string(),
            ));
        }

        info!(volunteer_id = %volunteer_id, bytes = pdf.len(), "Certificate issued");
        Ok(pdf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct EchoGenerator;

    #[async_trait]
    impl CertificateGenerator for EchoGenerator {
        async fn generate(&self, name: &str) -> AppResult<Vec<u8>> {
            Ok(format!("%PDF-1.4 {name}").into_bytes())
        }
    }

    struct EmptyGenerator;

    #[async_trait]
    impl CertificateGenerator for EmptyGenerator {
        async fn generate(&self, _name: &str) -> AppResult<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_issue_returns_pdf() {
        let service = CertificateService::new(Arc::new(EchoGenerator));
        let pdf = service.issue("v1", "  Meera Nair ").await.unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        assert!(String::from_utf8(pdf).unwrap().ends_with("Meera Nair"));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let service = CertificateService::new(Arc::new(EchoGenerator));
        assert!(matches!(
            service.issue("v1", "   ").await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_document_is_upstream_error() {
        let service = CertificateService::new(Arc::new(EmptyGenerator));
        assert!(matches!(
            service.issue("v1", "Meera").await,
            Err(AppError::ExternalService(_))
        ));
    }
}
