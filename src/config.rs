use dotenvy::dotenv;
use std::env;

use crate::engine::{
    DEFAULT_LATE_THRESHOLD, DEFAULT_OVERTIME_MULTIPLIER, DEFAULT_WORK_HOURS_PER_MONTH,
    EngineConfig,
};

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub db_max_connections: u32,

    pub api_prefix: String,
    pub currency_label: String,

    // Rate limiting
    pub rate_api_per_min: u32,
    pub rate_payroll_per_min: u32,

    pub engine: EngineConfig,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            currency_label: env::var("CURRENCY_LABEL").unwrap_or_else(|_| "IRR".to_string()),

            rate_api_per_min: env::var("RATE_API_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),
            rate_payroll_per_min: env::var("RATE_PAYROLL_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),

            engine: EngineConfig {
                late_threshold: env::var("LATE_THRESHOLD")
                    .unwrap_or_else(|_| DEFAULT_LATE_THRESHOLD.to_string()),
                work_hours_per_month: env::var("WORK_HOURS_PER_MONTH")
                    .unwrap_or_else(|_| DEFAULT_WORK_HOURS_PER_MONTH.to_string())
                    .parse()
                    .unwrap(),
                overtime_multiplier: env::var("OVERTIME_MULTIPLIER")
                    .unwrap_or_else(|_| DEFAULT_OVERTIME_MULTIPLIER.to_string())
                    .parse()
                    .unwrap(),
            },
        }
    }
}
