//! Locate the running executable the way a shell would have found it.
//!
//! argv\[0\] is looked up on `PATH` when it has no directory part, then made
//! absolute against the working directory and lexically cleaned (`.` and `..`
//! removed without touching the filesystem). The lookup and absolutize steps degrade to the raw
//! invocation string with a warning instead of failing.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::error::FlagfigError;

/// The running executable split into directory, stem and extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExePath {
    /// Directory holding the executable.
    pub dir: PathBuf,
    /// File name without extension, e.g. `myapp` for `myapp.exe`.
    pub name: String,
    /// Extension without the dot, empty if none.
    pub extension: String,
}

impl ExePath {
    /// Resolve the current process's executable from argv\[0\] and `PATH`.
    pub fn current() -> Self {
        let argv0 = std::env::args_os()
            .next()
            .map(PathBuf::from)
            .unwrap_or_default();
        let path_var = std::env::var_os("PATH");
        Self::resolve(&argv0, path_var.as_deref())
    }

    /// Resolve `argv0` against an explicit `PATH` value.
    pub fn resolve(argv0: &Path, path_var: Option<&OsStr>) -> Self {
        let found = match look_path(argv0, path_var) {
            Ok(path) => path,
            Err(e) => {
                warn!("{e}");
                argv0.to_path_buf()
            }
        };
        let absolute = match std::path::absolute(&found) {
            Ok(path) => clean(&path),
            Err(e) => {
                warn!(path = %found.display(), "cannot make executable path absolute: {e}");
                found
            }
        };
        Self::split(&absolute)
    }

    fn split(path: &Path) -> Self {
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            dir,
            name,
            extension,
        }
    }
}

/// Drop `.` components and fold `..` into its parent, purely lexically.
/// `..` at the root stays at the root.
fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other),
        }
    }
    cleaned
}

/// Find `name` the way `execvp` would: as given when it contains a directory
/// separator, otherwise in each `PATH` entry.
fn look_path(name: &Path, path_var: Option<&OsStr>) -> Result<PathBuf, FlagfigError> {
    let not_found = || FlagfigError::ExecutableNotFound {
        name: name.display().to_string(),
    };

    if name.as_os_str().is_empty() {
        return Err(not_found());
    }
    if name.components().count() > 1 {
        return if is_executable(name) {
            Ok(name.to_path_buf())
        } else {
            Err(not_found())
        };
    }

    let path_var = path_var.ok_or_else(not_found)?;
    std::env::split_paths(path_var)
        .map(|dir| {
            // an empty entry means the current directory
            if dir.as_os_str().is_empty() {
                PathBuf::from(".").join(name)
            } else {
                dir.join(name)
            }
        })
        .find(|candidate| is_executable(candidate))
        .ok_or_else(not_found)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
