use std::{env, time::Duration as StdDuration};

use chrono::{DateTime, Duration, Utc};
use log::*;
use order_watch_engine::{
    formatter::FormatOptions,
    reconciler::TombstonePolicy,
    OrderWindow,
    WatchOptions,
    DEFAULT_MARKETPLACE_ID,
    DEFAULT_ORDER_LOOKBACK_DAYS,
};
use ow_common::{parse_env_flag, Secret};
use sp_api_tools::SpApiConfig;

const DEFAULT_OW_HOST: &str = "127.0.0.1";
const DEFAULT_OW_PORT: u16 = 8370;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/order_watch.db";
pub const DEFAULT_DISCORD_API_URL: &str = "https://discord.com/api/v10";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Marketplace, listing window, formatting and tombstone settings for each cycle.
    pub watch: WatchOptions,
    /// When set, a background task runs a cycle on this interval. Otherwise cycles only run when `/check` is called.
    pub poll_interval: Option<StdDuration>,
    /// If true, the poller runs its first cycle immediately instead of waiting one interval.
    pub poll_on_startup: bool,
    pub discord: DiscordConfig,
    pub sp_api: SpApiConfig,
}

#[derive(Clone, Debug)]
pub struct DiscordConfig {
    pub api_url: String,
    pub bot_token: Secret<String>,
    /// The user id of the account owner. Notifications are sent to them as direct messages.
    pub owner_id: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self { api_url: DEFAULT_DISCORD_API_URL.to_string(), bot_token: Secret::default(), owner_id: String::default() }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_OW_HOST.to_string(),
            port: DEFAULT_OW_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            watch: WatchOptions::default(),
            poll_interval: None,
            poll_on_startup: true,
            discord: DiscordConfig::default(),
            sp_api: SpApiConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env_or_default() -> Self {
        let host = env::var("OW_HOST").ok().unwrap_or_else(|| DEFAULT_OW_HOST.into());
        let port = env::var("OW_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for OW_PORT. {e} Using the default, {DEFAULT_OW_PORT}, instead.");
                    DEFAULT_OW_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_OW_PORT);
        let database_url = env::var("OW_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ OW_DATABASE_URL is not set. Using {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let watch = watch_options_from_env();
        let poll_interval = parse_poll_interval(env::var("OW_POLL_INTERVAL_SECS").ok());
        let poll_on_startup = parse_env_flag("OW_POLL_ON_STARTUP", true);
        let discord = DiscordConfig::from_env_or_default();
        let sp_api = SpApiConfig::new_from_env_or_default();
        Self { host, port, database_url, watch, poll_interval, poll_on_startup, discord, sp_api }
    }
}

impl DiscordConfig {
    pub fn from_env_or_default() -> Self {
        let api_url = env::var("OW_DISCORD_API_URL").ok().unwrap_or_else(|| DEFAULT_DISCORD_API_URL.into());
        let bot_token = Secret::new(env::var("OW_DISCORD_TOKEN").ok().unwrap_or_else(|| {
            error!("🪛️ OW_DISCORD_TOKEN is not set. Notifications cannot be delivered.");
            String::default()
        }));
        let owner_id = env::var("OW_DISCORD_OWNER_ID").ok().unwrap_or_else(|| {
            error!("🪛️ OW_DISCORD_OWNER_ID is not set. Notifications cannot be delivered.");
            String::default()
        });
        Self { api_url, bot_token, owner_id }
    }
}

fn watch_options_from_env() -> WatchOptions {
    let marketplace_id = env::var("OW_MARKETPLACE_ID").ok().unwrap_or_else(|| {
        info!("🪛️ OW_MARKETPLACE_ID is not set. Using the US marketplace, {DEFAULT_MARKETPLACE_ID}.");
        DEFAULT_MARKETPLACE_ID.to_string()
    });
    let order_window =
        parse_order_window(env::var("OW_ORDERS_UPDATED_AFTER").ok(), env::var("OW_ORDER_LOOKBACK_DAYS").ok());
    let format = match env::var("OW_DOMESTIC_COUNTRY") {
        Ok(s) if !s.trim().is_empty() => FormatOptions { domestic_country: s.trim().to_string() },
        _ => FormatOptions::default(),
    };
    let tombstones = parse_tombstone_policy(env::var("OW_TOMBSTONE_MAX_AGE_DAYS").ok());
    WatchOptions { marketplace_id, order_window, format, tombstones }
}

/// A fixed start date takes precedence over a rolling lookback.
fn parse_order_window(updated_after: Option<String>, lookback_days: Option<String>) -> OrderWindow {
    if let Some(s) = updated_after {
        match s.trim().parse::<DateTime<Utc>>() {
            Ok(t) => return OrderWindow::Since(t),
            Err(e) => error!("🪛️ {s} is not a valid RFC 3339 timestamp for OW_ORDERS_UPDATED_AFTER. {e}. Ignoring it."),
        }
    }
    let days = lookback_days
        .and_then(|s| match s.trim().parse::<i64>() {
            Ok(d) if d > 0 => Some(d),
            _ => {
                error!(
                    "🪛️ {s} is not a valid number of days for OW_ORDER_LOOKBACK_DAYS. Using the default, \
                     {DEFAULT_ORDER_LOOKBACK_DAYS}, instead."
                );
                None
            },
        })
        .unwrap_or(DEFAULT_ORDER_LOOKBACK_DAYS);
    OrderWindow::Lookback(Duration::days(days))
}

fn parse_tombstone_policy(max_age_days: Option<String>) -> TombstonePolicy {
    match max_age_days {
        None => TombstonePolicy::unbounded(),
        Some(s) => match s.trim().parse::<i64>() {
            Ok(d) if d > 0 => {
                info!("🪛️ Tombstones will be evicted after {d} days");
                TombstonePolicy::with_max_age(Duration::days(d))
            },
            _ => {
                error!("🪛️ {s} is not a valid number of days for OW_TOMBSTONE_MAX_AGE_DAYS. Tombstones will be kept.");
                TombstonePolicy::unbounded()
            },
        },
    }
}

fn parse_poll_interval(secs: Option<String>) -> Option<StdDuration> {
    let s = secs?;
    match s.trim().parse::<u64>() {
        Ok(0) => {
            info!("🪛️ OW_POLL_INTERVAL_SECS is 0. Background polling is disabled.");
            None
        },
        Ok(n) => Some(StdDuration::from_secs(n)),
        Err(e) => {
            error!("🪛️ {s} is not a valid interval for OW_POLL_INTERVAL_SECS. {e} Background polling is disabled.");
            None
        },
    }
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn order_window_prefers_fixed_date() {
        let window = parse_order_window(Some("2020-11-01T00:04:45Z".into()), Some("7".into()));
        assert_eq!(window, OrderWindow::Since(Utc.with_ymd_and_hms(2020, 11, 1, 0, 4, 45).unwrap()));
    }

    #[test]
    fn order_window_falls_back_to_lookback() {
        let window = parse_order_window(Some("last tuesday".into()), Some("7".into()));
        assert_eq!(window, OrderWindow::Lookback(Duration::days(7)));
        let window = parse_order_window(None, Some("-3".into()));
        assert_eq!(window, OrderWindow::Lookback(Duration::days(DEFAULT_ORDER_LOOKBACK_DAYS)));
        assert_eq!(parse_order_window(None, None), OrderWindow::default());
    }

    #[test]
    fn tombstone_policy() {
        assert_eq!(parse_tombstone_policy(None), TombstonePolicy::unbounded());
        assert_eq!(parse_tombstone_policy(Some("90".into())), TombstonePolicy::with_max_age(Duration::days(90)));
        assert_eq!(parse_tombstone_policy(Some("forever".into())), TombstonePolicy::unbounded());
    }

    #[test]
    fn poll_interval() {
        assert_eq!(parse_poll_interval(None), None);
        assert_eq!(parse_poll_interval(Some("0".into())), None);
        assert_eq!(parse_poll_interval(Some("300".into())), Some(StdDuration::from_secs(300)));
        assert_eq!(parse_poll_interval(Some("5m".into())), None);
    }
}
