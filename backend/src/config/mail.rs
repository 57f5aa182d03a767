use anyhow::{Context, Result};

/// SMTP settings, loaded once at startup from the environment.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub security: TransportSecurity,
    pub from_email: String,
    pub from_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportSecurity {
    /// TLS from the first byte (SMTPS).
    Implicit,
    /// Plain connection upgraded via STARTTLS.
    StartTls,
}

impl TransportSecurity {
    pub fn from_mode(mode: &str) -> Self {
        match mode.to_ascii_lowercase().as_str() {
            "ssl" | "smtps" => TransportSecurity::Implicit,
            _ => TransportSecurity::StartTls,
        }
    }
}

impl MailConfig {
    pub fn from_env() -> Result<Self> {
        Ok(MailConfig {
            host: env_var("SMTP_HOST")?,
            port: env_var("SMTP_PORT")?
                .parse()
                .context("SMTP_PORT must be a port number")?,
            username: env_var("SMTP_USERNAME")?,
            password: env_var("SMTP_PASSWORD")?,
            security: TransportSecurity::from_mode(&env_var("SMTP_SECURE")?),
            from_email: env_var("SMTP_FROM_EMAIL")?,
            from_name: env_var("SMTP_FROM_NAME")?,
        })
    }
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{} must be set", name))
}
