//! Concrete collaborators for the order watch engine.
//!
//! * [`amazon::AmazonOrderSource`] lists orders and line items from the Amazon Selling Partner API.
//! * [`discord::DiscordNotifier`] delivers notifications to the account owner as Discord direct messages.
pub mod amazon;
pub mod discord;
