use log::*;
use ow_common::Secret;

pub const DEFAULT_SP_API_ENDPOINT: &str = "https://sellingpartnerapi-na.amazon.com";
pub const DEFAULT_LWA_TOKEN_URL: &str = "https://api.amazon.com/auth/o2/token";

#[derive(Debug, Clone, Default)]
pub struct SpApiConfig {
    /// Regional SP-API endpoint, e.g. "https://sellingpartnerapi-na.amazon.com"
    pub endpoint: String,
    pub token_url: String,
    pub lwa_client_id: String,
    pub lwa_client_secret: Secret<String>,
    pub refresh_token: Secret<String>,
}

impl SpApiConfig {
    pub fn new_from_env_or_default() -> Self {
        let endpoint = std::env::var("OW_SP_API_ENDPOINT").unwrap_or_else(|_| {
            warn!("OW_SP_API_ENDPOINT not set, using {DEFAULT_SP_API_ENDPOINT} as default");
            DEFAULT_SP_API_ENDPOINT.to_string()
        });
        let token_url = std::env::var("OW_LWA_TOKEN_URL").unwrap_or_else(|_| {
            debug!("OW_LWA_TOKEN_URL not set, using {DEFAULT_LWA_TOKEN_URL}");
            DEFAULT_LWA_TOKEN_URL.to_string()
        });
        let lwa_client_id = std::env::var("OW_LWA_CLIENT_ID").unwrap_or_else(|_| {
            warn!("OW_LWA_CLIENT_ID not set, using (probably useless) default");
            "amzn1.application-oa2-client.000000".to_string()
        });
        let lwa_client_secret = Secret::new(std::env::var("OW_LWA_CLIENT_SECRET").unwrap_or_else(|_| {
            warn!("OW_LWA_CLIENT_SECRET not set, using (probably useless) default");
            "00000000000000".to_string()
        }));
        let refresh_token = Secret::new(std::env::var("OW_LWA_REFRESH_TOKEN").unwrap_or_else(|_| {
            warn!("OW_LWA_REFRESH_TOKEN not set, using (probably useless) default");
            "Atzr|00000000000000".to_string()
        }));
        Self { endpoint, token_url, lwa_client_id, lwa_client_secret, refresh_token }
    }
}
