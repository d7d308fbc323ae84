//! Shared test utilities for the codex routing crates.
//!
//! Provides environment guards for tests that touch process-global state and
//! a temp-directory fixture laid out like a developer machine: a home
//! directory holding the organization config and a project checkout holding
//! the project config.

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

/// Relative location of config files under a search root.
pub const CONFIG_DIR: &str = ".fractary/codex";

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables - restores original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(v) = &self.previous {
            std::env::set_var(self.key, v);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

/// Set an environment variable and return a guard that restores the original on drop.
///
/// # Example
/// ```
/// let _guard = codex_test_utils::set_env_var("CODEX_ORG_SLUG", Some("acme"));
/// // CODEX_ORG_SLUG is "acme" until _guard drops
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    if let Some(val) = value {
        std::env::set_var(key, val);
    } else {
        std::env::remove_var(key);
    }
    EnvVarGuard { key, previous }
}

/// Temp directory with a home directory and one project checkout.
///
/// The tempdir is removed when the fixture drops.
pub struct ConfigFixture {
    pub tempdir: tempfile::TempDir,
    /// Stand-in for the user's home directory.
    pub home: PathBuf,
    /// Root of the project checkout; not below `home`.
    pub project: PathBuf,
}

impl ConfigFixture {
    /// Create `home/` and `repos/<project_name>/` under a fresh tempdir.
    pub fn new(project_name: &str) -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let home = tempdir.path().join("home");
        let project = tempdir.path().join("repos").join(project_name);

        std::fs::create_dir_all(&home)?;
        std::fs::create_dir_all(&project)?;

        Ok(Self {
            tempdir,
            home,
            project,
        })
    }

    /// Write the organization-scope config file (`file_name` e.g. `config.yaml`).
    pub fn write_org_config(&self, file_name: &str, content: &str) -> std::io::Result<PathBuf> {
        write_config(&self.home, file_name, content)
    }

    /// Write the project-scope config file.
    pub fn write_project_config(&self, file_name: &str, content: &str) -> std::io::Result<PathBuf> {
        write_config(&self.project, file_name, content)
    }

    /// A directory nested inside the project, created on demand.
    pub fn project_subdir(&self, relative: &str) -> std::io::Result<PathBuf> {
        let dir = self.project.join(relative);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

fn write_config(root: &Path, file_name: &str, content: &str) -> std::io::Result<PathBuf> {
    let dir = root.join(CONFIG_DIR);
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, content)?;
    Ok(path)
}
