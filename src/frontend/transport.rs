use async_trait::async_trait;

use crate::generate_core::{GenerateRequest, GenerateResponse};

#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("generate endpoint answered with status {0}")]
    Status(u16),

    #[error("request to generate endpoint failed")]
    Request(
        #[from]
        #[source]
        reqwest::Error,
    ),
}

#[async_trait]
pub trait GenerateTransport: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, TransportError>;
}

/// Posts requests to the `/api/generate` endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> HttpTransport {
        HttpTransport {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl GenerateTransport for HttpTransport {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, TransportError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        Ok(response.json::<GenerateResponse>().await?)
    }
}
