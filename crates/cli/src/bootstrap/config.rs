use fdns_domain::{CliOverrides, ServerConfig};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load(path, overrides)?;
    Ok(config)
}
