//! Host environment capability.
//!
//! Discovery and propagation never read `std::env` directly; they take an
//! [`Environment`] so tests can plant variables, a home directory and an OS
//! family without touching the real process.

use std::collections::HashMap;
use std::path::PathBuf;

/// The OS families jswitch distinguishes between.
///
/// Probes and the terminal profile are conditioned on this rather than on
/// `cfg!` so behaviour for another family stays testable everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    Mac,
    Linux,
}

impl OsFamily {
    /// The family of the running process.
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Mac
        } else {
            Self::Linux
        }
    }

    pub fn is_windows(self) -> bool {
        self == Self::Windows
    }

    /// Executable file name for this family (`java` vs `java.exe`).
    pub fn exe(self, base: &str) -> String {
        if self.is_windows() {
            format!("{base}.exe")
        } else {
            base.to_string()
        }
    }

    /// Separator used between entries of the `PATH` variable.
    pub fn path_separator(self) -> char {
        if self.is_windows() { ';' } else { ':' }
    }

    /// Suffix used by the editor's per-OS terminal settings keys.
    pub fn settings_suffix(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Mac => "osx",
            Self::Linux => "linux",
        }
    }
}

/// Read access to the process environment.
pub trait Environment: Send + Sync {
    /// Value of an environment variable, `None` when unset or not unicode.
    fn var(&self, name: &str) -> Option<String>;

    /// The user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;

    /// The OS family discovery should assume.
    fn os(&self) -> OsFamily;
}

/// The real process environment.
#[derive(Debug, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn os(&self) -> OsFamily {
        OsFamily::current()
    }
}

/// An environment built from fixed values, for tests and dry runs.
#[derive(Debug, Clone)]
pub struct StubEnvironment {
    vars: HashMap<String, String>,
    home: Option<PathBuf>,
    os: OsFamily,
}

impl StubEnvironment {
    pub fn new(os: OsFamily) -> Self {
        Self {
            vars: HashMap::new(),
            home: None,
            os,
        }
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }
}

impl Environment for StubEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn os(&self) -> OsFamily {
        self.os
    }
}
