use std::time::Duration;

pub const MAX_POST_LENGTH: usize = 5000;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DATABASE_URL: &str = "https://placeholder-supabase-url.supabase.co";
pub const DEFAULT_DATABASE_KEY: &str = "placeholder-anon-key";
pub const DEFAULT_HOME_LOAD_DELAY_MS: u64 = 1000;
pub const DEFAULT_PROFILE_LOAD_DELAY_MS: u64 = 500;

/// Connection parameters for the hosted store the fixtures stand in for.
#[derive(Clone, Debug, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl DatabaseConfig {
    /// Key with everything but the first four characters masked, for logs.
    pub fn redacted_key(&self) -> String {
        let visible: String = self.anon_key.chars().take(4).collect();
        format!("{}***", visible)
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    pub database: DatabaseConfig,
    pub home_load_delay: Duration,
    pub profile_load_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                anon_key: DEFAULT_DATABASE_KEY.to_string(),
            },
            home_load_delay: Duration::from_millis(DEFAULT_HOME_LOAD_DELAY_MS),
            profile_load_delay: Duration::from_millis(DEFAULT_PROFILE_LOAD_DELAY_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            bind_addr: bind_addr(),
            database: DatabaseConfig {
                url: env_string("SOCIAL_DATABASE_URL", DEFAULT_DATABASE_URL),
                anon_key: env_string("SOCIAL_DATABASE_KEY", DEFAULT_DATABASE_KEY),
            },
            home_load_delay: Duration::from_millis(env_millis(
                "SOCIAL_HOME_LOAD_DELAY_MS",
                DEFAULT_HOME_LOAD_DELAY_MS,
            )),
            profile_load_delay: Duration::from_millis(env_millis(
                "SOCIAL_PROFILE_LOAD_DELAY_MS",
                DEFAULT_PROFILE_LOAD_DELAY_MS,
            )),
        }
    }
}

pub fn bind_addr() -> String {
    env_string("SOCIAL_BIND_ADDR", DEFAULT_BIND_ADDR)
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_millis(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}
