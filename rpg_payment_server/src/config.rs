use std::{env, path::PathBuf};

use log::*;
use razorpay_tools::RazorpayConfig;
use rpg_common::{parse_boolean_flag, DEFAULT_CURRENCY_CODE};
use rpg_payment_engine::sqlite::db::SQLITE_DB_URL;

const DEFAULT_RPG_HOST: &str = "0.0.0.0";
const DEFAULT_RPG_PORT: u16 = 5000;
const DEFAULT_REPORT_PATH: &str = "reports/payments_report.xlsx";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Where the payments report is written, and served from.
    pub report_path: PathBuf,
    /// The currency used for orders that do not specify one.
    pub default_currency: String,
    /// If true, `/last-order` and `/last-payment` are served.
    pub enable_debug_routes: bool,
    pub razorpay: RazorpayConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPG_HOST.to_string(),
            port: DEFAULT_RPG_PORT,
            database_url: SQLITE_DB_URL.to_string(),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            default_currency: DEFAULT_CURRENCY_CODE.to_string(),
            enable_debug_routes: true,
            razorpay: RazorpayConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env_or_default() -> Self {
        let host = env::var("RPG_HOST").ok().unwrap_or_else(|| DEFAULT_RPG_HOST.into());
        let port = configure_port();
        let database_url = env::var("RPG_DATABASE_URL").ok().unwrap_or_else(|| {
            info!("🪛️ RPG_DATABASE_URL is not set. Using the default, {SQLITE_DB_URL}.");
            SQLITE_DB_URL.to_string()
        });
        let report_path = env::var("RPG_REPORT_PATH").map(PathBuf::from).unwrap_or_else(|_| {
            info!("🪛️ RPG_REPORT_PATH is not set. Using the default, {DEFAULT_REPORT_PATH}.");
            PathBuf::from(DEFAULT_REPORT_PATH)
        });
        let default_currency = env::var("RPG_DEFAULT_CURRENCY")
            .ok()
            .map(|s| s.trim().to_uppercase())
            .filter(|s| {
                let valid = s.len() == 3 && s.chars().all(|c| c.is_ascii_alphabetic());
                if !valid {
                    warn!("🪛️ {s} is not a valid currency code for RPG_DEFAULT_CURRENCY. Using {DEFAULT_CURRENCY_CODE}.");
                }
                valid
            })
            .unwrap_or_else(|| DEFAULT_CURRENCY_CODE.to_string());
        let enable_debug_routes = parse_boolean_flag(env::var("RPG_ENABLE_DEBUG_ROUTES").ok(), true);
        if enable_debug_routes {
            info!("🪛️ Debug routes (/last-order, /last-payment) are enabled.");
        }
        let razorpay = RazorpayConfig::new_from_env_or_default();
        Self { host, port, database_url, report_path, default_currency, enable_debug_routes, razorpay }
    }
}

/// `RPG_PORT` takes precedence over `PORT`, which is what most hosting platforms set.
fn configure_port() -> u16 {
    let (name, value) = match (env::var("RPG_PORT"), env::var("PORT")) {
        (Ok(s), _) => ("RPG_PORT", s),
        (Err(_), Ok(s)) => ("PORT", s),
        _ => return DEFAULT_RPG_PORT,
    };
    value.trim().parse::<u16>().unwrap_or_else(|e| {
        error!("🪛️ {value} is not a valid port for {name}. {e} Using the default, {DEFAULT_RPG_PORT}, instead.");
        DEFAULT_RPG_PORT
    })
}
