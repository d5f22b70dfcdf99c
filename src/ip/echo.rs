use std::time::Duration;

use reqwest::{Client, IntoUrl, Url};
use thiserror::Error;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Asks an external echo service which address this machine appears as.
#[derive(Debug)]
pub struct EchoIpSource {
    url: Url,
    client: Client,
}

impl EchoIpSource {
    pub fn new<U: IntoUrl>(url: U) -> Result<Self, EchoIpError> {
        let url = url.into_url().map_err(EchoIpError::Network)?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(EchoIpError::Network)?;

        Ok(Self { url, client })
    }
}

#[async_trait::async_trait]
impl super::Source for EchoIpSource {
    type Error = EchoIpError;

    #[tracing::instrument(skip(self))]
    async fn public_ip(&self) -> Result<String, Self::Error> {
        let body = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(EchoIpError::Network)?
            .text()
            .await
            .map_err(EchoIpError::Decode)?;

        let ip = body.trim().to_owned();
        debug!(%ip, "resolved public ip");

        Ok(ip)
    }
}

#[derive(Debug, Error)]
pub enum EchoIpError {
    #[error(transparent)]
    Network(reqwest::Error),
    #[error("unreadable response body: {0}")]
    Decode(reqwest::Error),
}

#[cfg(test)]
mod tests {
    use httptest::{
        matchers::request,
        responders::status_code,
        Expectation, Server,
    };

    use super::*;
    use crate::ip::Source as _;

    #[tokio::test]
    async fn returns_trimmed_body() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/"))
                .respond_with(status_code(200).body("5.6.7.8\n")),
        );

        let source = EchoIpSource::new(server.url_str("/")).unwrap();
        assert_eq!(source.public_ip().await.unwrap(), "5.6.7.8");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_network_error() {
        // Nothing listens on port 1.
        let source = EchoIpSource::new("http://127.0.0.1:1/").unwrap();
        let result = source.public_ip().await;

        assert!(matches!(result, Err(EchoIpError::Network(_))));
    }
}
