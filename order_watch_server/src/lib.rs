//! # Order watch server
//! This module hosts the server code for the order watcher. It is responsible for:
//! Fetching the seller's current orders from the Amazon Selling Partner API.
//! Comparing them against the snapshot saved on the previous check, using the order watch engine.
//! Sending a summary of new and shipped orders to the account owner over Discord.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/check`: Runs one order check (GET or POST) and returns the notification text that was sent.
//!
//! Checks can also be run on a fixed interval by setting `OW_POLL_INTERVAL_SECS`.

pub mod cli;
pub mod config;
pub mod errors;
pub mod integrations;
pub mod poller;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
