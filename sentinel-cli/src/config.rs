use sentinel::{DetectorConfig, RoiFraction};
use serde::Deserialize;

pub const SCHEMA_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
pub const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RoiJson {
    start_x: f64,
    start_y: f64,
    end_x: f64,
    end_y: f64,
}

impl Default for RoiJson {
    fn default() -> Self {
        let roi = RoiFraction::default();
        Self {
            start_x: roi.start_x,
            start_y: roi.start_y,
            end_x: roi.end_x,
            end_y: roi.end_y,
        }
    }
}

impl From<RoiJson> for RoiFraction {
    fn from(value: RoiJson) -> Self {
        Self {
            start_x: value.start_x,
            start_y: value.start_y,
            end_x: value.end_x,
            end_y: value.end_y,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DetectorJson {
    roi: RoiJson,
    match_threshold: f32,
    alignment_tolerance: u32,
    min_run: i64,
    max_run: i64,
    frame_divisor: u64,
    heartbeat_interval: u64,
}

impl Default for DetectorJson {
    fn default() -> Self {
        let cfg = DetectorConfig::default();
        Self {
            roi: RoiJson::default(),
            match_threshold: cfg.match_threshold,
            alignment_tolerance: cfg.alignment_tolerance,
            min_run: cfg.min_run,
            max_run: cfg.max_run,
            frame_divisor: cfg.frame_divisor,
            heartbeat_interval: cfg.heartbeat_interval,
        }
    }
}

impl From<DetectorJson> for DetectorConfig {
    fn from(value: DetectorJson) -> Self {
        Self {
            roi: value.roi.into(),
            match_threshold: value.match_threshold,
            alignment_tolerance: value.alignment_tolerance,
            min_run: value.min_run,
            max_run: value.max_run,
            frame_divisor: value.frame_divisor,
            heartbeat_interval: value.heartbeat_interval,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub template_path: String,
    pub enable_overlay: bool,
    pub detector: DetectorJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_path: "template.png".to_owned(),
            enable_overlay: false,
            detector: DetectorJson::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, EXAMPLE_JSON, SCHEMA_JSON};
    use sentinel::DetectorConfig;

    #[test]
    fn example_config_matches_defaults() {
        let config: Config = serde_json::from_str(EXAMPLE_JSON).unwrap();
        assert_eq!(config.template_path, "template.png");
        assert!(!config.enable_overlay);
        let detector: DetectorConfig = config.detector.into();
        assert_eq!(detector, DetectorConfig::default());
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "detector": { "frame_divisor": 1, "min_run": 30 } }"#)
                .unwrap();
        let detector: DetectorConfig = config.detector.into();
        assert_eq!(detector.frame_divisor, 1);
        assert_eq!(detector.min_run, 30);
        assert_eq!(detector.max_run, 300);
        assert_eq!(detector.roi, DetectorConfig::default().roi);
    }

    #[test]
    fn schema_is_valid_json() {
        let schema: serde_json::Value = serde_json::from_str(SCHEMA_JSON).unwrap();
        assert_eq!(schema["type"], "object");
    }
}
