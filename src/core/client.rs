// src/core/client.rs

use crate::core::models::{
    AnalysisRequest, AnalysisResult, HealthResponse, RawEmailBody, SelectedFile, ServiceStatus,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use url::Url;

/// Message shown to the user for every dispatch failure, whatever the cause.
pub const SERVICE_UNREACHABLE: &str =
    "Analysis service unreachable. Start the analysis backend and try again.";

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("could not read {name}: {source}")]
    FileRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("service answered HTTP {0}")]
    Status(StatusCode),

    #[error("response was not a valid analysis result: {0}")]
    Decode(#[from] serde_json::Error),
}

impl DispatchError {
    /// The user never sees the cause; all failures read the same.
    pub fn user_message(&self) -> &'static str {
        SERVICE_UNREACHABLE
    }
}

/// Thin client for the remote analysis service.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: &Url) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .user_agent(concat!("PhishScope/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Sends the active selection and returns the service verdict.
    pub async fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResult, DispatchError> {
        let outcome = match request {
            AnalysisRequest::File(file) => self.analyze_file(file).await,
            AnalysisRequest::Text(raw) => self.analyze_text(raw).await,
        };
        match &outcome {
            Ok(result) => info!(
                risk_score = ?result.risk_score,
                confidence = ?result.confidence,
                severity = ?result.severity,
                "Analysis received."
            ),
            Err(e) => error!(error = %e, "Analysis dispatch failed."),
        }
        outcome
    }

    async fn analyze_text(&self, raw_email: &str) -> Result<AnalysisResult, DispatchError> {
        let url = self.endpoint("analyze");
        debug!(url = %url, chars = raw_email.chars().count(), "Posting raw email.");
        let response = self
            .client
            .post(&url)
            .json(&RawEmailBody { raw_email })
            .send()
            .await?;
        decode(response).await
    }

    async fn analyze_file(&self, file: &SelectedFile) -> Result<AnalysisResult, DispatchError> {
        let url = self.endpoint("analyze-file");
        let bytes = tokio::fs::read(&file.path).await.map_err(|source| DispatchError::FileRead {
            name: file.name.clone(),
            source,
        })?;
        debug!(url = %url, name = %file.name, bytes = bytes.len(), "Uploading email file.");

        let part = Part::bytes(bytes)
            .file_name(file.name.clone())
            .mime_str("message/rfc822")?;
        let form = Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        decode(response).await
    }

    /// Calls `GET /health`. Any failure reads as unreachable.
    pub async fn health(&self) -> ServiceStatus {
        let url = self.endpoint("health");
        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(url = %url, error = %e, "Health check failed.");
                return ServiceStatus::Unreachable;
            }
        };
        if !response.status().is_success() {
            warn!(status = %response.status(), "Health check returned an error status.");
            return ServiceStatus::Unreachable;
        }
        match response.json::<HealthResponse>().await {
            Ok(body) if body.status == "operational" => ServiceStatus::Operational,
            Ok(body) => {
                warn!(status = %body.status, "Service reported a degraded status.");
                ServiceStatus::Unreachable
            }
            Err(e) => {
                warn!(error = %e, "Health check body was not understood.");
                ServiceStatus::Unreachable
            }
        }
    }
}

async fn decode(response: Response) -> Result<AnalysisResult, DispatchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(DispatchError::Status(status));
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
