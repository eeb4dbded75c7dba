//! Installation root validation.

use std::path::Path;

use jswitch_core::{OsFamily, RuntimeKind};

/// Whether `path` is a well-formed installation root for `kind`.
///
/// A JDK root must contain `bin/java` (with the `.exe` suffix on Windows);
/// a Maven root must contain `bin/mvn` (the launcher script ships under
/// that name on every platform). Nonexistent paths are a normal `false`,
/// never an error.
pub fn is_valid_installation(os: OsFamily, kind: RuntimeKind, path: &Path) -> bool {
    match kind {
        RuntimeKind::Jdk => is_valid_jdk(os, path),
        RuntimeKind::Maven => is_valid_maven(path),
    }
}

pub(crate) fn is_valid_jdk(os: OsFamily, path: &Path) -> bool {
    path.exists() && path.join("bin").join(os.exe("java")).exists()
}

pub(crate) fn is_valid_maven(path: &Path) -> bool {
    path.join("bin").join("mvn").exists()
}
