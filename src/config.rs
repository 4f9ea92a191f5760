use crate::errors::{NotifierError, Result};
use url::Url;

/// Port the routing layer is expected on when the configured address names
/// only a host.
const DEFAULT_ROUTING_PORT: u16 = 8080;

/// Address the notifier itself listens on.
const LISTEN_ADDRESS: &str = "0.0.0.0:8080";

/// Runtime configuration, built once at startup and handed to the service
/// by constructor injection.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the routing layer fronting both collaborators
    base_url: Url,
    /// Local listener address
    pub listen_address: String,
}

impl Config {
    /// Builds a config from the routing-layer address, given as `host` or
    /// `host:port`. A bare host implies port 8080.
    pub fn new(routing_host: &str) -> Result<Self> {
        let routing_address = if routing_host.contains(':') {
            routing_host.to_string()
        } else {
            format!("{routing_host}:{DEFAULT_ROUTING_PORT}")
        };

        let base_url = Url::parse(&format!("http://{routing_address}/")).map_err(|e| {
            NotifierError::InvalidConfig(format!("routing address {routing_host:?}: {e}"))
        })?;
        if base_url.host_str().is_none() {
            return Err(NotifierError::InvalidConfig(format!(
                "routing address {routing_host:?} has no host"
            )));
        }

        Ok(Self {
            base_url,
            listen_address: LISTEN_ADDRESS.to_string(),
        })
    }

    /// Mapper endpoint. The path is fixed and the mapper is always asked
    /// for a preview rendition.
    pub fn mapper_url(&self) -> Url {
        let mut url = self.base_url.clone();
        url.set_path("/map");
        url.set_query(Some("preview=true"));
        url
    }

    /// Store-writer endpoint for one content identifier.
    pub fn store_url(&self, uuid: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                NotifierError::InternalError("routing base URL is not hierarchical".to_string())
            })?
            .push(uuid);
        Ok(url)
    }
}
