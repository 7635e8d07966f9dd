use dotproxy_domain::Config;
use tracing::debug;

/// Loads `.env` and the process environment. Any error here stops startup
/// before a socket is opened.
pub fn load_config(path: Option<&str>) -> anyhow::Result<Config> {
    let config = Config::load(path)?;
    debug!(?config, "Configuration loaded");
    Ok(config)
}
