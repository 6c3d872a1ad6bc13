use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wheelfeed::feed::SocketPath;
use wheelfeed::mapping::VideoFit;

pub const DEFAULT_NUM_COLORS: usize = 8;
pub const FRICTION: f64 = 0.985;
pub const MIN_STOP_SPEED: f64 = 0.05;
pub const SPIN_SPEED_MIN: f64 = 20.0;
pub const SPIN_SPEED_MAX: f64 = 35.0;
pub const PINCH_START: f64 = 0.05;
pub const PINCH_RELEASE: f64 = 0.08;
pub const HAND_NEAR_WHEEL_RATIO: f64 = 1.4;
pub const BUTTON_MARGIN: f64 = 20.0;
pub const FEED_TIMEOUT_SECS: u32 = 15;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WheelConfig {
    pub num_colors: usize,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            num_colors: DEFAULT_NUM_COLORS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub friction: f64,
    pub min_stop_speed: f64,
    pub spin_speed_min: f64,
    pub spin_speed_max: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction: FRICTION,
            min_stop_speed: MIN_STOP_SPEED,
            spin_speed_min: SPIN_SPEED_MIN,
            spin_speed_max: SPIN_SPEED_MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GestureConfig {
    pub pinch_start: f64,
    pub pinch_release: f64,
    pub near_wheel_ratio: f64,
    pub button_margin: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_start: PINCH_START,
            pinch_release: PINCH_RELEASE,
            near_wheel_ratio: HAND_NEAR_WHEEL_RATIO,
            button_margin: BUTTON_MARGIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Wheel center as a fraction of the viewport width.
    pub center_x_ratio: f64,
    pub max_radius: f64,
    /// Radius is `min(max_radius, height / radius_divisor)`.
    pub radius_divisor: f64,
    pub button_width: f64,
    pub button_height: f64,
    /// Gap between the wheel rim and the top of the button.
    pub button_offset: f64,
    pub video_fit: VideoFit,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center_x_ratio: 0.75,
            max_radius: 250.0,
            radius_divisor: 2.8,
            button_width: 200.0,
            button_height: 70.0,
            button_offset: 90.0,
            video_fit: VideoFit::Cover,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedConfig {
    pub socket_path: SocketPath,
    pub timeout_secs: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            socket_path: SocketPath::default(),
            timeout_secs: FEED_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            (self.wheel.num_colors >= 1, "wheel.num_colors must be at least 1"),
            (
                self.physics.friction > 0.0 && self.physics.friction < 1.0,
                "physics.friction must lie in (0, 1)",
            ),
            (
                self.physics.min_stop_speed > 0.0,
                "physics.min_stop_speed must be positive",
            ),
            (
                self.physics.spin_speed_min < self.physics.spin_speed_max,
                "physics.spin_speed_min must be below spin_speed_max",
            ),
            (
                self.gesture.pinch_start > 0.0
                    && self.gesture.pinch_start < self.gesture.pinch_release,
                "gesture.pinch_start must be positive and below pinch_release",
            ),
            (
                self.gesture.near_wheel_ratio > 0.0,
                "gesture.near_wheel_ratio must be positive",
            ),
            (
                self.layout.radius_divisor > 0.0,
                "layout.radius_divisor must be positive",
            ),
        ];

        match checks.into_iter().find(|(ok, _)| !ok) {
            Some((_, reason)) => Err(ConfigError::Invalid(reason)),
            None => Ok(()),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid config: {0}")]
    Invalid(&'static str),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "spinwheel", "spinwheel")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("SPINWHEEL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Falling back to default config: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(|p| p.to_path_buf()) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", ConfigError::from(e));
        return;
    }
    log::debug!("Watching {} for changes", config_dir.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let touches_config = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touches_config && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
