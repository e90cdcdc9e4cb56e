use log::*;
use order_watch_engine::traits::{Notifier, NotifierError, DISCORD_CHARACTER_LIMIT};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client,
    Response,
};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::config::DiscordConfig;

#[derive(Debug, Serialize)]
struct CreateDmRequest<'a> {
    recipient_id: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateMessageRequest<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct Channel {
    id: String,
}

/// A [`Notifier`] that sends each chunk to the account owner as a Discord direct message.
///
/// The DM channel is opened on the first delivery and reused for the lifetime of the notifier.
pub struct DiscordNotifier {
    api_url: String,
    owner_id: String,
    client: Client,
    dm_channel: OnceCell<String>,
}

impl DiscordNotifier {
    pub fn new(config: &DiscordConfig) -> Result<Self, NotifierError> {
        if config.bot_token.reveal().is_empty() {
            return Err(NotifierError::ConfigurationError("No Discord bot token was provided".into()));
        }
        if config.owner_id.is_empty() {
            return Err(NotifierError::ConfigurationError("No Discord owner id was provided".into()));
        }
        let mut headers = HeaderMap::with_capacity(1);
        let mut auth = HeaderValue::from_str(&format!("Bot {}", config.bot_token.reveal()))
            .map_err(|e| NotifierError::ConfigurationError(format!("Invalid bot token. {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| NotifierError::ConfigurationError(e.to_string()))?;
        Ok(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            owner_id: config.owner_id.clone(),
            client,
            dm_channel: OnceCell::new(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }

    async fn dm_channel(&self) -> Result<&str, NotifierError> {
        self.dm_channel.get_or_try_init(|| self.open_dm_channel()).await.map(String::as_str)
    }

    async fn open_dm_channel(&self) -> Result<String, NotifierError> {
        debug!("💬️ Opening DM channel with {}", self.owner_id);
        let response = self
            .client
            .post(self.url("/users/@me/channels"))
            .json(&CreateDmRequest { recipient_id: &self.owner_id })
            .send()
            .await
            .map_err(|e| NotifierError::ChannelUnavailable(e.to_string()))?;
        let response = check_response(response).await?;
        let channel =
            response.json::<Channel>().await.map_err(|e| NotifierError::ChannelUnavailable(e.to_string()))?;
        info!("💬️ DM channel {} is open", channel.id);
        Ok(channel.id)
    }
}

impl Notifier for DiscordNotifier {
    async fn deliver(&self, chunk: &str) -> Result<(), NotifierError> {
        let channel = self.dm_channel().await?;
        let response = self
            .client
            .post(self.url(&format!("/channels/{channel}/messages")))
            .json(&CreateMessageRequest { content: chunk })
            .send()
            .await
            .map_err(|e| NotifierError::ChannelUnavailable(e.to_string()))?;
        check_response(response).await?;
        trace!("💬️ Delivered {} characters to channel {channel}", chunk.chars().count());
        Ok(())
    }

    fn max_message_len(&self) -> usize {
        DISCORD_CHARACTER_LIMIT
    }
}

async fn check_response(response: Response) -> Result<Response, NotifierError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    warn!("💬️ Discord rejected the request. {status}. {message}");
    Err(NotifierError::Rejected { status: status.as_u16(), message })
}

#[cfg(test)]
mod test {
    use ow_common::Secret;

    use super::*;

    fn config() -> DiscordConfig {
        DiscordConfig {
            api_url: "https://discord.test/api/v10/".into(),
            bot_token: Secret::new("bot-token".into()),
            owner_id: "80351110224678912".into(),
        }
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let cfg = DiscordConfig { bot_token: Secret::default(), ..config() };
        assert!(matches!(DiscordNotifier::new(&cfg), Err(NotifierError::ConfigurationError(_))));
        let cfg = DiscordConfig { owner_id: String::new(), ..config() };
        assert!(matches!(DiscordNotifier::new(&cfg), Err(NotifierError::ConfigurationError(_))));
    }

    #[test]
    fn urls() {
        let notifier = DiscordNotifier::new(&config()).unwrap();
        assert_eq!(notifier.url("/users/@me/channels"), "https://discord.test/api/v10/users/@me/channels");
        assert_eq!(notifier.max_message_len(), 2000);
    }

    #[test]
    fn request_bodies() {
        let body = serde_json::to_string(&CreateDmRequest { recipient_id: "42" }).unwrap();
        assert_eq!(body, r#"{"recipient_id":"42"}"#);
        let body = serde_json::to_string(&CreateMessageRequest { content: "🎊 New Orders 🎉\n" }).unwrap();
        assert_eq!(body, r#"{"content":"🎊 New Orders 🎉\n"}"#);
    }
}
