use log::{info, warn};
use std::time::Duration;

use crate::components::navbar::NavbarConfig;

pub const THANK_YOU_PATH: &str = "/thank_you.html";

pub struct SiteConfig {
    pub name: String,
    pub tagline: String,
    pub contact_email: String,
    pub navbar: NavbarConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: String::from("Secret Shopper Express"),
            tagline: String::from("Get paid to shop, dine and review local businesses."),
            contact_email: String::from("support@secretshopperexpress.com"),
            navbar: NavbarConfig::default(),
        }
    }
}

pub fn get_site_config() -> SiteConfig {
    SiteConfig::default()
}

/// Settings the form controller needs from its page.
#[derive(Debug, Clone)]
pub struct FormOptions {
    pub endpoint: String,
    pub redirect_fallback: String,
    pub redirect_delay: Duration,
    pub age_field: String,
    pub minimum_age: u32,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            endpoint: String::from("/sendmail"),
            redirect_fallback: String::from(THANK_YOU_PATH),
            redirect_delay: Duration::from_millis(1500),
            age_field: String::from("age"),
            minimum_age: 18,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

impl ServerConfig {
    /// Reads `HOST`, `PORT` and `STATIC_DIR`, falling back to defaults.
    /// Call after `dotenv()` so values from `.env` are visible.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().unwrap_or_else(|e| {
                warn!("Invalid PORT value {:?} ({}), using 8080", raw, e);
                8080
            }),
            Err(_) => {
                info!("PORT not set, using default: 8080");
                8080
            }
        };
        let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "./static".to_string());

        Self {
            host,
            port,
            static_dir,
        }
    }
}
