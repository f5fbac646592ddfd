//! Configuration: column names, load options, defaults and window setup.
//!
//! [`ViewerSettings`] is the serializable part and lives in
//! `~/.tradeview/config.yaml` (or a path passed with `--config`).
//! [`TradeViewConfig`] wraps it with things only code can provide, such as
//! `eframe::NativeOptions`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::filter::CommentScope;
use crate::data::hotkeys::Hotkeys;
use crate::data::projection::{Aggregation, PlotStyle};
use crate::data::selection::PlotOrder;
use crate::data::table::CsvOptions;
use crate::error::ConfigError;

/// Names of the well-known, all optional, trade-log columns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub direction: String,
    pub comment: String,
    pub open_time: String,
    pub close_time: String,
    pub profit: String,
    pub swap: String,
    pub commission: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            direction: "Direction".into(),
            comment: "Comment".into(),
            open_time: "Open Time".into(),
            close_time: "Close Time".into(),
            profit: "Profit".into(),
            swap: "Swap".into(),
            commission: "Commission".into(),
        }
    }
}

impl ColumnNames {
    /// Value columns plotted by default, in this order, when present.
    pub fn default_value_columns(&self) -> [&str; 3] {
        [
            self.profit.as_str(),
            self.swap.as_str(),
            self.commission.as_str(),
        ]
    }
}

/// Settings that can be stored as YAML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub csv: CsvOptions,
    pub columns: ColumnNames,
    /// Direction values offered by the filter besides "Both".
    pub directions: Vec<String>,
    pub comment_scope: CommentScope,
    /// Hover tooltip radius in pixels.
    pub hover_radius_px: f64,
    pub plot_style: PlotStyle,
    pub aggregation: Aggregation,
    pub plot_order: PlotOrder,
    /// Optional unit appended to y readouts (e.g. "USD").
    pub y_unit: Option<String>,
    pub hotkeys: Hotkeys,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            csv: CsvOptions::default(),
            columns: ColumnNames::default(),
            directions: vec!["Long".into(), "Short".into()],
            comment_scope: CommentScope::default(),
            hover_radius_px: 10.0,
            plot_style: PlotStyle::default(),
            aggregation: Aggregation::default(),
            plot_order: PlotOrder::default(),
            y_unit: None,
            hotkeys: Hotkeys::default(),
        }
    }
}

impl ViewerSettings {
    pub fn hover_radius_sq(&self) -> f64 {
        self.hover_radius_px * self.hover_radius_px
    }

    /// `~/.tradeview/config.yaml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = std::env::var_os("HOME").ok_or(ConfigError::NoHome)?;
        Ok(PathBuf::from(home).join(".tradeview").join("config.yaml"))
    }

    pub fn from_yaml(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&s)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, self.to_yaml()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, or the default path when `None`. A missing default file
    /// yields defaults silently; any other failure yields defaults with a
    /// warning.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Ok(p) => (p, false),
                Err(e) => {
                    log::warn!("using default settings: {}", e);
                    return Self::default();
                }
            },
        };
        if !explicit && !path.exists() {
            return Self::default();
        }
        match Self::load_from_path(&path) {
            Ok(s) => {
                log::info!("settings loaded from {:?}", path);
                s
            }
            Err(e) => {
                log::warn!("using default settings: {}", e);
                Self::default()
            }
        }
    }
}

/// Full startup configuration for [`run_tradeview`](crate::run_tradeview).
pub struct TradeViewConfig {
    /// Window title.
    pub title: String,
    /// File to open on startup.
    pub initial_file: Option<PathBuf>,
    pub settings: ViewerSettings,
    /// Optional eframe native options; defaults are used when `None`.
    pub native_options: Option<eframe::NativeOptions>,
}

impl Default for TradeViewConfig {
    fn default() -> Self {
        Self {
            title: "TradeView".into(),
            initial_file: None,
            settings: ViewerSettings::default(),
            native_options: None,
        }
    }
}
