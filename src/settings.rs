use config::{Config, Environment};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

const DEFAULT_PORKBUN_API_URL: &str = "https://api.porkbun.com/api/json/v3/";
const DEFAULT_TWILIO_API_URL: &str = "https://api.twilio.com/";
const DEFAULT_IP_ECHO_URL: &str = "https://api.ipify.org?format=text";
const DEFAULT_RECORD_TYPE: &str = "A";

#[derive(Debug, Deserialize)]
pub struct PorkbunSettings {
    #[serde(default = "default_porkbun_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default)]
    pub record_id: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub subdomain: String,
    #[serde(default = "default_record_type")]
    pub record_type: String,
}

#[derive(Debug, Deserialize)]
pub struct TwilioSettings {
    #[serde(default = "default_twilio_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub account_sid: String,
    #[serde(default)]
    pub auth_token: String,
    #[serde(default)]
    pub from_phone: String,
    #[serde(default)]
    pub to_phone: String,
}

#[derive(Debug, Deserialize)]
pub struct IpSettings {
    #[serde(default = "default_ip_echo_url")]
    pub echo_url: String,
}

#[derive(Debug)]
pub struct Settings {
    pub porkbun: PorkbunSettings,
    pub twilio: TwilioSettings,
    pub ip: IpSettings,
}

impl Settings {
    pub fn new() -> Result<Self, SettingsError> {
        Self::from_env(
            Environment::with_prefix("PORKBUN"),
            Environment::with_prefix("TWILIO"),
            Environment::with_prefix("IP"),
        )
    }

    fn from_env(
        porkbun: Environment,
        twilio: Environment,
        ip: Environment,
    ) -> Result<Self, SettingsError> {
        let settings = Self {
            porkbun: section(porkbun)?,
            twilio: section(twilio)?,
            ip: section(ip)?,
        };
        settings.validate()?;

        Ok(settings)
    }

    /// Only the Porkbun credentials are required up front; a missing domain
    /// or subdomain surfaces later as a provider-side failure.
    fn validate(&self) -> Result<(), SettingsError> {
        let porkbun = &self.porkbun;
        if porkbun.api_key.is_empty()
            || porkbun.secret_key.is_empty()
            || porkbun.record_id.is_empty()
        {
            return Err(SettingsError::MissingCredentials);
        }

        Ok(())
    }
}

fn section<T: DeserializeOwned>(env: Environment) -> Result<T, SettingsError> {
    Ok(Config::builder().add_source(env).build()?.try_deserialize()?)
}

fn default_porkbun_api_url() -> String {
    DEFAULT_PORKBUN_API_URL.to_owned()
}

fn default_twilio_api_url() -> String {
    DEFAULT_TWILIO_API_URL.to_owned()
}

fn default_ip_echo_url() -> String {
    DEFAULT_IP_ECHO_URL.to_owned()
}

fn default_record_type() -> String {
    DEFAULT_RECORD_TYPE.to_owned()
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("required api credentials missing")]
    MissingCredentials,
}

#[cfg(test)]
mod tests {
    use config::Map;

    use super::*;

    fn env(prefix: &str, vars: &[(&str, &str)]) -> Environment {
        let source: Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(prefix).source(Some(source))
    }

    fn porkbun_vars<'a>() -> Vec<(&'a str, &'a str)> {
        vec![
            ("PORKBUN_API_KEY", "pk1_test"),
            ("PORKBUN_SECRET_KEY", "sk1_test"),
            ("PORKBUN_RECORD_ID", "106926652"),
            ("PORKBUN_DOMAIN", "example.com"),
            ("PORKBUN_SUBDOMAIN", "home"),
        ]
    }

    #[test]
    fn loads_sections_from_environment() {
        let settings = Settings::from_env(
            env("PORKBUN", &porkbun_vars()),
            env(
                "TWILIO",
                &[
                    ("TWILIO_ACCOUNT_SID", "AC123"),
                    ("TWILIO_AUTH_TOKEN", "token"),
                    ("TWILIO_FROM_PHONE", "+15550001111"),
                    ("TWILIO_TO_PHONE", "+15550002222"),
                ],
            ),
            env("IP", &[]),
        )
        .unwrap();

        assert_eq!(settings.porkbun.api_key, "pk1_test");
        assert_eq!(settings.porkbun.domain, "example.com");
        assert_eq!(settings.porkbun.subdomain, "home");
        assert_eq!(settings.twilio.account_sid, "AC123");
        assert_eq!(settings.twilio.to_phone, "+15550002222");
    }

    #[test]
    fn applies_defaults_for_urls_and_record_type() {
        let settings = Settings::from_env(
            env("PORKBUN", &porkbun_vars()),
            env("TWILIO", &[]),
            env("IP", &[]),
        )
        .unwrap();

        assert_eq!(settings.porkbun.api_url, DEFAULT_PORKBUN_API_URL);
        assert_eq!(settings.porkbun.record_type, "A");
        assert_eq!(settings.twilio.api_url, DEFAULT_TWILIO_API_URL);
        assert_eq!(settings.ip.echo_url, DEFAULT_IP_ECHO_URL);
    }

    #[test]
    fn rejects_missing_credentials() {
        let result = Settings::from_env(
            env("PORKBUN", &[("PORKBUN_DOMAIN", "example.com")]),
            env("TWILIO", &[]),
            env("IP", &[]),
        );

        assert!(matches!(result, Err(SettingsError::MissingCredentials)));
    }

    #[test]
    fn rejects_empty_credential() {
        let mut vars = porkbun_vars();
        vars[1] = ("PORKBUN_SECRET_KEY", "");

        let result = Settings::from_env(
            env("PORKBUN", &vars),
            env("TWILIO", &[]),
            env("IP", &[]),
        );

        assert!(matches!(result, Err(SettingsError::MissingCredentials)));
    }

    #[test]
    fn twilio_fields_are_optional() {
        let settings = Settings::from_env(
            env("PORKBUN", &porkbun_vars()),
            env("TWILIO", &[]),
            env("IP", &[]),
        )
        .unwrap();

        assert!(settings.twilio.account_sid.is_empty());
        assert!(settings.twilio.auth_token.is_empty());
    }
}
