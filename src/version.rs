//! Build metadata, as shown by `--version`.

use std::env::consts::{ARCH, OS};

pub static VERSION: &str = env!("CARGO_PKG_VERSION");

/// Set `PASSWORD_ZEN_BUILD_DATE` at compile time to stamp release builds.
pub static BUILD_DATE: &str = match option_env!("PASSWORD_ZEN_BUILD_DATE") {
    Some(date) => date,
    None => "development",
};

/// Set `PASSWORD_ZEN_GIT_COMMIT` at compile time to stamp release builds.
pub static GIT_COMMIT: &str = match option_env!("PASSWORD_ZEN_GIT_COMMIT") {
    Some(commit) => commit,
    None => "development",
};

pub fn short() -> &'static str {
    VERSION
}

pub fn info() -> String {
    format!(
        "Password Zen v{}\nBuilt: {}\nCommit: {}\nTarget: {}/{}",
        VERSION, BUILD_DATE, GIT_COMMIT, OS, ARCH
    )
}
