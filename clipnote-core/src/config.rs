use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server_url: String,
    pub last_video: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_string(),
            last_video: String::new(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("clipnote").join("config.json");
            if config_path.exists() {
                if let Ok(content) = std::fs::read_to_string(&config_path) {
                    if let Ok(config) = serde_json::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join("clipnote");
            std::fs::create_dir_all(&app_dir)?;
            let config_path = app_dir.join("config.json");
            let content = serde_json::to_string_pretty(self)?;
            std::fs::write(config_path, content)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_server() {
        let config = Config::default();
        assert_eq!(config.server_url, "http://localhost:8000");
        assert!(config.last_video.is_empty());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = Config {
            server_url: "https://clipnote.example.com".to_string(),
            last_video: "dQw4w9WgXcQ".to_string(),
        };

        let json = serde_json::to_string(&config).expect("serializes");
        let parsed: Config = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(parsed.server_url, config.server_url);
        assert_eq!(parsed.last_video, config.last_video);
    }
}
