use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::settings::PorkbunSettings;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const STATUS_SUCCESS: &str = "SUCCESS";

pub struct PorkbunProvider {
    base_url: Url,
    client: Client,

    api_key: String,
    secret_key: String,
    record_id: String,
    domain: String,
    record_name: String,
    record_type: String,
}

impl PorkbunProvider {
    pub fn new(cfg: PorkbunSettings) -> Result<Self, PorkbunError> {
        let mut base_url = Url::parse(&cfg.api_url)?;
        if base_url.cannot_be_a_base() {
            return Err(PorkbunError::BadBaseUrl);
        }
        // Url::join treats the last segment as a file unless it ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(PorkbunError::Network)?;

        Ok(Self {
            base_url,
            client,
            api_key: cfg.api_key,
            secret_key: cfg.secret_key,
            record_id: cfg.record_id,
            domain: cfg.domain,
            record_name: cfg.subdomain,
            record_type: cfg.record_type,
        })
    }

    fn endpoint(&self, action: &str) -> Result<Url, PorkbunError> {
        Ok(self.base_url.join(&format!(
            "dns/{}/{}/{}",
            action, self.domain, self.record_id
        ))?)
    }
}

#[async_trait::async_trait]
impl super::Provider for PorkbunProvider {
    type Error = PorkbunError;

    #[tracing::instrument(skip(self))]
    async fn current_content(&self) -> Result<String, Self::Error> {
        let body = RetrieveRequest {
            apikey: &self.api_key,
            secretapikey: &self.secret_key,
        };

        let response = self
            .client
            .post(self.endpoint("retrieve")?)
            .json(&body)
            .send()
            .await
            .map_err(PorkbunError::Network)?;

        let decoded: RetrieveResponse =
            response.json().await.map_err(PorkbunError::Decode)?;
        debug!(
            status = %decoded.status,
            records = decoded.records.len(),
            "retrieved dns record"
        );

        decoded
            .records
            .into_iter()
            .next()
            .map(|r| r.content)
            .ok_or(PorkbunError::RecordNotFound)
    }

    #[tracing::instrument(skip(self))]
    async fn update_record(&self, content: &str) -> Result<(), Self::Error> {
        let body = EditRequest {
            apikey: &self.api_key,
            secretapikey: &self.secret_key,
            name: &self.record_name,
            record_type: &self.record_type,
            content,
        };

        let response = self
            .client
            .post(self.endpoint("edit")?)
            .json(&body)
            .send()
            .await
            .map_err(PorkbunError::Network)?;

        let decoded: EditResponse =
            response.json().await.map_err(PorkbunError::Decode)?;
        if decoded.status != STATUS_SUCCESS {
            return Err(PorkbunError::Api(decoded.message));
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct RetrieveRequest<'a> {
    apikey: &'a str,
    secretapikey: &'a str,
}

#[derive(Serialize)]
struct EditRequest<'a> {
    apikey: &'a str,
    secretapikey: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    record_type: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct RetrieveResponse {
    status: String,
    #[serde(default)]
    records: Vec<DnsRecord>,
}

#[derive(Debug, Deserialize)]
struct DnsRecord {
    content: String,
}

#[derive(Debug, Deserialize)]
struct EditResponse {
    status: String,
    // Absent on success responses.
    #[serde(default)]
    message: String,
}

#[derive(Debug, Error)]
pub enum PorkbunError {
    #[error(transparent)]
    Network(reqwest::Error),
    #[error("malformed provider response: {0}")]
    Decode(reqwest::Error),
    #[error("dns record not found")]
    RecordNotFound,
    #[error("provider rejected the request: {0}")]
    Api(String),
    #[error("bad base url")]
    BadBaseUrl,
    #[error(transparent)]
    UrlParseError(#[from] url::ParseError),
}
