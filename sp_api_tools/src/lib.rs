//! A small client for the parts of the Amazon Selling Partner API (SP-API) that an order watcher needs:
//! listing the orders of a marketplace and fetching the line items of an order.
//!
//! Requests are authorised with a Login with Amazon (LWA) access token, obtained from a long-lived refresh token and
//! cached until shortly before it expires.
mod api;
mod config;
mod error;

mod data_objects;
pub mod helpers;

pub use api::SpApi;
pub use config::SpApiConfig;
pub use data_objects::{SpAddress, SpMoney, SpOrder, SpOrderItem};
pub use error::SpApiError;
