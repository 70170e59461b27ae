use std::{env, env::VarError};

/// Environment variables that are safe to print. `RAZORPAY_KEY_SECRET` is deliberately absent.
const DISPLAY_ENVS: [&str; 11] = [
    "RUST_LOG",
    "RPG_HOST",
    "RPG_PORT",
    "PORT",
    "RPG_DATABASE_URL",
    "RPG_REPORT_PATH",
    "RPG_DEFAULT_CURRENCY",
    "RPG_ENABLE_DEBUG_ROUTES",
    "RAZORPAY_KEY_ID",
    "RAZORPAY_BASE_URL",
    "RAZORPAY_TIMEOUT_SECS",
];

/// The server has no options. Any argument at all prints the help text and the current configuration, and returns
/// `true` so that the caller can exit.
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        display_help();
        display_envs();
    }
    has_cli_args
}

fn display_help() {
    const HELP: &str = include_str!("./cli-help.txt");
    println!("\n{HELP}\n");
}

fn display_envs() {
    println!("Current environment values (secrets are not shown):");
    for name in DISPLAY_ENVS {
        println!("  {name:<35} {:<15}", env_value(name));
    }
}

fn env_value(name: &str) -> String {
    match env::var(name) {
        Ok(s) => s,
        Err(VarError::NotPresent) => "Not set".into(),
        Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
    }
}
