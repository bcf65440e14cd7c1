use std::{env, path::PathBuf, sync::Once};

use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".budget_planner";
const HOME_ENV: &str = "BUDGET_PLANNER_HOME";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        install_subscriber();
    });
}

/// Installs the fmt subscriber. Returns `false` when the host application already set one.
fn install_subscriber() -> bool {
    use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

    let filter = EnvFilter::from_default_env().add_directive(
        "budget_planner=info"
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into()),
    );

    match fmt().with_env_filter(filter).try_init() {
        Ok(()) => true,
        Err(error) => {
            tracing::debug!(%error, "tracing subscriber already installed, keeping it");
            false
        }
    }
}

/// Returns the application data directory, defaulting to `~/.budget_planner`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_subscriber_install_is_reported_not_fatal() {
        install_subscriber();
        assert!(!install_subscriber());
        init_tracing();
    }
}
