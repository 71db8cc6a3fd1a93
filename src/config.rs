use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub store_endpoint: String,
    pub store_key: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            store_endpoint: env::var("STORE_ENDPOINT").expect("STORE_ENDPOINT must be set"),
            store_key: env::var("STORE_KEY").expect("STORE_KEY must be set"),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        }
    }
}
