use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use crate::generate_core::DEFAULT_MODEL;

static DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3030";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub listen_addr: SocketAddr,
    /// Address the browser uses to reach this server.
    pub reachable_addr: String,
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub model: String,
}

impl Settings {
    pub fn from_env() -> Result<Settings> {
        dotenv().ok();
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let listen_addr = var("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned());
        let listen_addr: SocketAddr = listen_addr
            .parse()
            .with_context(|| format!("LISTEN_ADDR is not a socket address: {listen_addr}"))?;

        Ok(Settings {
            listen_addr,
            reachable_addr: var("REACHABLE_ADDR").unwrap_or_else(|| listen_addr.to_string()),
            api_key: var("OPENAI_API_KEY"),
            api_base: var("OPENAI_API_BASE"),
            model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
        })
    }

    pub fn endpoint_url(&self) -> String {
        format!("http://{}/api/generate", self.reachable_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[]).unwrap();
        assert_eq!(settings.listen_addr, "127.0.0.1:3030".parse().unwrap());
        assert_eq!(settings.reachable_addr, "127.0.0.1:3030");
        assert_eq!(settings.api_key, None);
        assert_eq!(settings.api_base, None);
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.endpoint_url(), "http://127.0.0.1:3030/api/generate");
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            ("LISTEN_ADDR", "0.0.0.0:8080"),
            ("REACHABLE_ADDR", "codegen.local:8080"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o"),
        ])
        .unwrap();
        assert_eq!(settings.listen_addr.port(), 8080);
        assert_eq!(settings.api_key.as_deref(), Some("sk-test"));
        assert_eq!(settings.model, "gpt-4o");
        assert_eq!(settings.endpoint_url(), "http://codegen.local:8080/api/generate");
    }

    #[test]
    fn test_blank_key_is_absent() {
        let settings = settings(&[("OPENAI_API_KEY", "  ")]).unwrap();
        assert_eq!(settings.api_key, None);
    }

    #[test]
    fn test_bad_listen_addr() {
        assert!(settings(&[("LISTEN_ADDR", "localhost")]).is_err());
    }
}
