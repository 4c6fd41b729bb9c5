use std::env;
use std::str::FromStr;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub responses_path: String,
    pub redis_url: Option<String>,
    pub session_ttl_secs: u64,
    pub max_history: usize,
    pub escalation_after_messages: u32,
    pub personalize_probability: f64,
    pub frontend_url: Option<String>,
    pub branding: Branding,
}

/// Company details substituted into catalog responses.
#[derive(Debug, Clone, PartialEq)]
pub struct Branding {
    pub company_name: String,
    pub bot_name: String,
    pub support_email: String,
    pub support_phone: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            company_name: "Your Company".to_string(),
            bot_name: "SupportBot".to_string(),
            support_email: "support@yourcompany.com".to_string(),
            support_phone: "1-800-123-4567".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            responses_path: "responses.json".to_string(),
            redis_url: None,
            session_ttl_secs: 86_400,
            max_history: 200,
            escalation_after_messages: 3,
            personalize_probability: 0.5,
            frontend_url: None,
            branding: Branding::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let branding = Branding::default();

        Self {
            host: env::var("BACKEND_HOST").unwrap_or(defaults.host),
            port: parse_or("BACKEND_PORT", defaults.port),
            responses_path: env::var("RESPONSES_PATH").unwrap_or(defaults.responses_path),
            redis_url: non_empty("REDIS_URL"),
            session_ttl_secs: parse_or("SESSION_TTL_SECS", defaults.session_ttl_secs),
            max_history: parse_or("MAX_HISTORY", defaults.max_history),
            escalation_after_messages: parse_or(
                "ESCALATION_AFTER_MESSAGES",
                defaults.escalation_after_messages,
            ),
            personalize_probability: probability_or(
                "PERSONALIZE_PROBABILITY",
                defaults.personalize_probability,
            ),
            frontend_url: non_empty("FRONTEND_URL"),
            branding: Branding {
                company_name: env::var("COMPANY_NAME").unwrap_or(branding.company_name),
                bot_name: env::var("BOT_NAME").unwrap_or(branding.bot_name),
                support_email: env::var("SUPPORT_EMAIL").unwrap_or(branding.support_email),
                support_phone: env::var("SUPPORT_PHONE").unwrap_or(branding.support_phone),
            },
        }
    }
}

fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// A finite value clamped to [0, 1]; NaN and infinities fall back to `default`.
fn probability_or(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite())
        .map_or(default, |p| p.clamp(0.0, 1.0))
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
