use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ChartsConfig {
    pub server: ServerSettings,
    #[serde(default)]
    pub defaults: ChartDefaults,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Chart options applied when a render input does not set them.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ChartDefaults {
    #[serde(default)]
    pub force_zero_floor: bool,
    #[serde(default)]
    pub alert_value: Option<f64>,
}

fn builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080_i64)?
        .set_default("defaults.force_zero_floor", false)?)
}

/// Load `config/charts.toml` (optional) overlaid by `CHARTS_*` environment
/// variables, e.g. `CHARTS_SERVER__PORT=9090`.
pub fn load_charts_config() -> anyhow::Result<ChartsConfig> {
    let settings = builder()?
        .add_source(config::File::with_name("config/charts").required(false))
        .add_source(config::Environment::with_prefix("CHARTS").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn parse_charts_config(toml: &str) -> anyhow::Result<ChartsConfig> {
    let settings = builder()?
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = parse_charts_config("").unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.defaults, ChartDefaults::default());
    }

    #[test]
    fn test_overrides() {
        let cfg = parse_charts_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9090

            [defaults]
            force_zero_floor = true
            alert_value = 75.5
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.bind_address(), "127.0.0.1:9090");
        assert!(cfg.defaults.force_zero_floor);
        assert_eq!(cfg.defaults.alert_value, Some(75.5));
    }
}
