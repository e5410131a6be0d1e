#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub max_file_size: usize,
    pub vehicle_id: String,
    pub dashboard_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let max_file_size_mb = std::env::var("MAX_FILE_SIZE_MB")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(25);

        let vehicle_id = std::env::var("VEHICLE_ID")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "vehicle1".to_string());

        let dashboard_dir = std::env::var("DASHBOARD_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "assets/web".to_string());

        Self {
            port,
            max_file_size: max_file_size_mb * 1024 * 1024,
            vehicle_id,
            dashboard_dir,
        }
    }
}
