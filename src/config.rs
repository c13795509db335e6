use std::env;

const DEFAULT_SHARE_LINK_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;
const MAX_SHARE_LINK_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub base_url: String,
    pub dev_mode: bool,
    pub wishlist: WishlistSettings,
    /// HMAC key for share links. None = generate a per-process key at startup.
    pub share_link_secret: Option<String>,
    pub share_link_ttl_seconds: i64,
    /// Channel used when a request carries no `X-Channel` header
    pub default_channel: String,
}

/// Feature switches that gate wishlist operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WishlistSettings {
    /// Global storefront switch for the wishlist feature
    pub enabled: bool,
    /// Customer setting allowing wishlists to be shared by link
    pub sharing_enabled: bool,
}

impl Default for WishlistSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            sharing_enabled: true,
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| v != "false" && v != "0")
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let dev_mode = env::var("WISHLIST_ENV")
            .map(|v| v == "dev" || v == "development")
            .unwrap_or(false);

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let base_url = env::var("BASE_URL")
            .unwrap_or_else(|_| format!("http://{}:{}", host, port));

        let share_link_ttl_seconds: i64 = env::var("SHARE_LINK_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &i64| *v > 0)
            .map(|v| v.min(MAX_SHARE_LINK_TTL_SECONDS))
            .unwrap_or(DEFAULT_SHARE_LINK_TTL_SECONDS);

        Self {
            host,
            port,
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "wishlist.db".to_string()),
            base_url,
            dev_mode,
            wishlist: WishlistSettings {
                enabled: env_flag("WISHLIST_ENABLED", true),
                sharing_enabled: env_flag("WISHLIST_SHARE_ENABLED", true),
            },
            share_link_secret: env::var("SHARE_LINK_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
            share_link_ttl_seconds,
            default_channel: env::var("DEFAULT_CHANNEL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "default".to_string()),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
