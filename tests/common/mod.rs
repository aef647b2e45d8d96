// Shared test helpers: an isolated home directory with its own
// credential file.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated home with its own credential file
pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub config: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let config = home.join(".config").join("thoth").join("config");
        fs::create_dir_all(config.parent().unwrap()).expect("create config dir");
        Self {
            _tmp: tmp,
            home,
            config,
        }
    }

    /// Same as `new`, with `THOTH_API_KEY=<key>` written to the config file
    pub fn with_key(key: &str) -> Self {
        let env = Self::new();
        fs::write(&env.config, format!("THOTH_API_KEY={key}\n")).expect("write config");
        env
    }

    /// `thoth` with HOME pointing at the temp dir and the API at `base_url`
    pub fn cmd(&self, base_url: &str) -> Command {
        let mut cmd = Command::cargo_bin("thoth").unwrap();
        cmd.env("HOME", &self.home)
            .env("THOTH_API_URL", base_url)
            .env_remove("THOTH_API_KEY")
            .env_remove("THOTH_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}
