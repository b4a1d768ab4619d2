use crate::error::{ApiError, ApiResult};
use crate::types::{ErrorBody, PredictResponse, PredictionLabel, SelectedFile, ServiceInfo};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Multipart field the classification service reads the upload from.
pub const UPLOAD_FIELD: &str = "input_file";

const USER_AGENT: &str = concat!("birdwatch/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the classification service.
///
/// Only a connect timeout is set; once connected, a request waits for the
/// service however long inference takes.
#[derive(Clone)]
pub struct ClassifierApi {
    client: Client,
    endpoint: Url,
}

impl ClassifierApi {
    pub fn new(endpoint: &str, connect_timeout: Duration) -> ApiResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ApiError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ApiError::InvalidEndpoint(format!(
                "unsupported scheme {}",
                endpoint.scheme()
            )));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Uploads `file` and returns the label the service assigned to it.
    ///
    /// Exactly one request is made; there is no retry.
    pub async fn predict(&self, file: &SelectedFile) -> ApiResult<PredictionLabel> {
        let part = Part::bytes(file.contents.to_vec())
            .file_name(file.name.clone())
            .mime_str(file.mime_type())?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        tracing::debug!(
            endpoint = %self.endpoint,
            file = %file.name,
            bytes = file.len(),
            "Uploading file for prediction"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .map(|b| b.detail_text());
            return Err(ApiError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        parse_prediction(&body)
    }

    /// Probes the service root, which answers with a welcome message.
    pub async fn service_info(&self) -> ApiResult<ServiceInfo> {
        let url = self
            .endpoint
            .join("/")
            .map_err(|e| ApiError::InvalidEndpoint(e.to_string()))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                detail: None,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }
}

fn parse_prediction(body: &[u8]) -> ApiResult<PredictionLabel> {
    let data: PredictResponse =
        serde_json::from_slice(body).map_err(|e| ApiError::MalformedResponse(e.to_string()))?;

    if data.prediction.as_str().is_empty() {
        return Err(ApiError::MalformedResponse("empty prediction".to_string()));
    }

    Ok(data.prediction)
}
