//! Host environment utility functions

use std::path::PathBuf;

/// Name of the environment variable pointing at the software root directory.
pub const ROOT_ENV_VAR: &str = "PLAN_VIZ_ROOT";

/// Get the software root directory from the environment.
///
/// Parameter files are resolved relative to `<root>/params`.
pub fn get_plan_viz_root() -> Result<PathBuf, std::env::VarError> {
    std::env::var(ROOT_ENV_VAR).map(PathBuf::from)
}
