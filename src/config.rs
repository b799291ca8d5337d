use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    // empty = in-memory store
    pub database_url: String,
    pub simulate_latency: bool,
    pub seed_demo_tours: bool,
    pub cors_allow_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_default(),
            simulate_latency: env_flag("SIMULATE_LATENCY", false),
            seed_demo_tours: env_flag("SEED_DEMO_TOURS", true),
            cors_allow_origin: env::var("CORS_ALLOW_ORIGIN").unwrap_or_else(|_| "*".to_string()),
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
