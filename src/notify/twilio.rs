use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::settings::TwilioSettings;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MESSAGES_API_VERSION: &str = "2010-04-01";

pub struct TwilioNotifier {
    messages_url: Url,
    client: Client,

    account_sid: String,
    auth_token: String,
    from_phone: String,
    to_phone: String,
}

impl TwilioNotifier {
    pub fn new(cfg: TwilioSettings) -> Result<Self, TwilioError> {
        let mut messages_url = Url::parse(&cfg.api_url)?;
        messages_url
            .path_segments_mut()
            .map_err(|_| TwilioError::BadBaseUrl)?
            .pop_if_empty()
            // The account SID is percent-escaped segment by segment.
            .extend([
                MESSAGES_API_VERSION,
                "Accounts",
                &cfg.account_sid,
                "Messages.json",
            ]);

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(TwilioError::Network)?;

        Ok(Self {
            messages_url,
            client,
            account_sid: cfg.account_sid,
            auth_token: cfg.auth_token,
            from_phone: cfg.from_phone,
            to_phone: cfg.to_phone,
        })
    }
}

#[async_trait::async_trait]
impl super::Notifier for TwilioNotifier {
    type Error = TwilioError;

    #[tracing::instrument(skip(self, message))]
    async fn notify(&self, message: &str) -> Result<(), Self::Error> {
        let params = [
            ("To", self.to_phone.as_str()),
            ("From", self.from_phone.as_str()),
            ("Body", message),
        ];

        let response = self
            .client
            .post(self.messages_url.clone())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(TwilioError::Network)?;

        let status = response.status();
        if status != StatusCode::CREATED {
            return Err(TwilioError::Api(status));
        }
        debug!(to = %self.to_phone, "sms notification sent");

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum TwilioError {
    #[error(transparent)]
    Network(reqwest::Error),
    #[error("sms provider returned {0}")]
    Api(StatusCode),
    #[error("bad base url")]
    BadBaseUrl,
    #[error(transparent)]
    UrlParseError(#[from] url::ParseError),
}
