//! The one network interaction: a multipart POST to the prediction endpoint.

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::{domain::StagedFile, protocol::PredictResponse};
use tracing::debug;

use crate::{config::ClientSettings, error::TransportError};

#[async_trait]
pub trait PredictionTransport: Send + Sync {
    async fn submit(&self, file: &StagedFile) -> Result<PredictResponse, TransportError>;
}

pub struct HttpPredictionTransport {
    http: Client,
    endpoint_url: String,
    upload_field: String,
}

impl HttpPredictionTransport {
    pub fn new(settings: &ClientSettings) -> Self {
        Self {
            http: Client::new(),
            endpoint_url: settings.endpoint_url.clone(),
            upload_field: settings.upload_field.clone(),
        }
    }

    fn form_for(&self, file: &StagedFile) -> Result<Form, TransportError> {
        let part = Part::bytes(file.bytes.to_vec()).file_name(file.name.clone());
        let part = match &file.mime_type {
            Some(mime) => part.mime_str(mime).map_err(TransportError::Request)?,
            None => part,
        };
        Ok(Form::new().part(self.upload_field.clone(), part))
    }
}

#[async_trait]
impl PredictionTransport for HttpPredictionTransport {
    async fn submit(&self, file: &StagedFile) -> Result<PredictResponse, TransportError> {
        let form = self.form_for(file)?;
        // Error statuses still carry a JSON body with `success: false`, so the status is not checked.
        let response = self
            .http
            .post(&self.endpoint_url)
            .multipart(form)
            .send()
            .await
            .map_err(TransportError::Request)?;
        let status = response.status();
        let body = response.bytes().await.map_err(TransportError::Body)?;
        debug!(
            %status,
            body_bytes = body.len(),
            endpoint = %self.endpoint_url,
            "prediction response received"
        );

        Ok(serde_json::from_slice(&body)?)
    }
}
