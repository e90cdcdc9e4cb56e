use std::{env, env::VarError};

/// There's no real CLI for the server, so just do quick 'n dirty
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        // We don't expect any CLI args, so always print the help
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // Be explicit about which envars to print, so as to avoid accidentally exposing secrets
    const DISPLAY_ENVS: [&str; 15] = [
        "RUST_LOG",
        "OW_HOST",
        "OW_PORT",
        "OW_DATABASE_URL",
        "OW_MARKETPLACE_ID",
        "OW_ORDERS_UPDATED_AFTER",
        "OW_ORDER_LOOKBACK_DAYS",
        "OW_DOMESTIC_COUNTRY",
        "OW_TOMBSTONE_MAX_AGE_DAYS",
        "OW_POLL_INTERVAL_SECS",
        "OW_POLL_ON_STARTUP",
        "OW_DISCORD_OWNER_ID",
        "OW_DISCORD_API_URL",
        "OW_SP_API_ENDPOINT",
        "OW_LWA_CLIENT_ID",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
