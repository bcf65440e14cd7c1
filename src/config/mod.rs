use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ledger::Calendar;
use crate::planner::time::Clock;
use crate::utils::app_data_dir;

const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_HORIZON_DAYS: u32 = 365;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// How far ahead occurrences are generated, in days from today.
    #[serde(default = "Config::default_horizon_days")]
    pub horizon_days: u32,
    /// First day of the week for the "This Week" and "Next Week" buckets.
    #[serde(default = "Config::default_week_start")]
    pub week_start: Weekday,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            week_start: Weekday::Mon,
        }
    }
}

impl Config {
    pub fn calendar(&self, clock: &dyn Clock) -> Calendar {
        Calendar::from_clock(clock, self.week_start)
    }

    /// Last day occurrences are generated for. Saturates at the latest representable date.
    pub fn horizon(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(self.horizon_days.into()))
            .unwrap_or(NaiveDate::MAX)
    }

    fn default_horizon_days() -> u32 {
        DEFAULT_HORIZON_DAYS
    }

    fn default_week_start() -> Weekday {
        Weekday::Mon
    }
}

/// Loads and saves [`Config`] as JSON under the application data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, CoreError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Reads the stored configuration, falling back to defaults when none was saved yet.
    pub fn load(&self) -> Result<Config, CoreError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_all(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
