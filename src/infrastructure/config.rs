use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub listen_addr: String,
    pub data_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewerConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

pub fn load_service_config(path: Option<&str>) -> anyhow::Result<ServiceConfig> {
    let settings = config::Config::builder()
        .set_default("listen_addr", "0.0.0.0:8000")?
        .set_default("data_dir", "data")?
        .add_source(config::File::with_name(path.unwrap_or("config/service")).required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_viewer_config(path: Option<&str>) -> anyhow::Result<ViewerConfig> {
    let settings = config::Config::builder()
        .set_default("base_url", "http://localhost:8000")?
        .set_default("request_timeout_secs", 10)?
        .add_source(config::File::with_name(path.unwrap_or("config/viewer")).required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_config_files() {
        let service = load_service_config(Some("/nonexistent/service")).unwrap();
        assert_eq!(service.listen_addr, "0.0.0.0:8000");
        assert_eq!(service.data_dir, PathBuf::from("data"));

        let viewer = load_viewer_config(Some("/nonexistent/viewer")).unwrap();
        assert_eq!(viewer.base_url, "http://localhost:8000");
        assert_eq!(viewer.request_timeout_secs, 10);
    }
}
