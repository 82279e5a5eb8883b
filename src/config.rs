use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Service name, for startup logs
    pub service_name: String,
    /// Address the API server binds to
    pub listen_addr: String,
    /// Base URL of the geolocation provider endpoint
    pub provider_base_url: String,
    /// Timeout for each outbound provider call, in seconds
    pub provider_timeout_secs: u64,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "geolocator".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            provider_base_url: "http://ip-api.com/json".to_string(),
            provider_timeout_secs: 5,
            debug: false,
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    let service_name = std::env::var("GEOLOCATOR_SERVICE_NAME")
        .unwrap_or_else(|_| "geolocator".to_string());

    let listen_addr = std::env::var("GEOLOCATOR_LISTEN_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    let provider_base_url = std::env::var("GEOLOCATOR_PROVIDER_URL")
        .unwrap_or_else(|_| "http://ip-api.com/json".to_string());

    let provider_timeout_secs = std::env::var("GEOLOCATOR_PROVIDER_TIMEOUT_SECS")
        .unwrap_or_else(|_| "5".to_string())
        .parse()
        .unwrap_or(5);

    let debug = std::env::var("DEBUG").is_ok();

    Ok(Config {
        service_name,
        listen_addr,
        provider_base_url,
        provider_timeout_secs,
        debug,
    })
}
