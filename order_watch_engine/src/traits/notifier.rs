use thiserror::Error;

/// Discord rejects messages longer than this many characters.
pub const DISCORD_CHARACTER_LIMIT: usize = 2000;

#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    #[error("Could not reach the notification channel. {0}")]
    ChannelUnavailable(String),
    #[error("The notification channel rejected the message. Error {status}. {message}")]
    Rejected { status: u16, message: String },
    #[error("Notification channel is not configured. {0}")]
    ConfigurationError(String),
}

#[allow(async_fn_in_trait)]
pub trait Notifier {
    /// Deliver a single chunk. Chunks are at most [`Notifier::max_message_len`] characters long.
    async fn deliver(&self, chunk: &str) -> Result<(), NotifierError>;

    fn max_message_len(&self) -> usize {
        DISCORD_CHARACTER_LIMIT
    }
}
