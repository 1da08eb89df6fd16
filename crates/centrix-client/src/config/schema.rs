use serde::Deserialize;

use centrix_core::error::{CentrixError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub api: ApiSection,

    #[serde(default)]
    pub pipe: PipeSection,
}

impl ClientConfig {
    /// In-code config for a static API address.
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            version: 1,
            api: ApiSection {
                addr: Some(addr.into()),
                ..ApiSection::default()
            },
            pipe: PipeSection::default(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.api.key = Some(key.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.api.timeout_ms = timeout_ms;
        self
    }

    pub fn with_reset_on_send(mut self, enabled: bool) -> Self {
        self.pipe.reset_on_send = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(CentrixError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.api.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// Static API endpoint. May be omitted when a resolver is injected.
    #[serde(default)]
    pub addr: Option<String>,

    /// Sent as `Authorization: apikey <key>`.
    #[serde(default)]
    pub key: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_max_idle_per_host")]
    pub max_idle_per_host: usize,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            addr: None,
            key: None,
            timeout_ms: default_timeout_ms(),
            max_idle_per_host: default_max_idle_per_host(),
        }
    }
}

impl ApiSection {
    pub fn validate(&self) -> Result<()> {
        if let Some(addr) = &self.addr {
            if !(addr.starts_with("http://") || addr.starts_with("https://")) {
                return Err(CentrixError::Config(
                    "api.addr must be an http:// or https:// url".into(),
                ));
            }
        }
        if !(1..=600000).contains(&self.timeout_ms) {
            return Err(CentrixError::Config(
                "api.timeout_ms must be between 1 and 600000".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipeSection {
    /// Remove sent commands from a pipe after a successful send.
    #[serde(default)]
    pub reset_on_send: bool,
}

fn default_timeout_ms() -> u64 {
    1000
}
fn default_max_idle_per_host() -> usize {
    100
}
