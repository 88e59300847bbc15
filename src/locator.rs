//! Config file discovery.
//!
//! A [`Locator`] holds candidate file paths in **priority-descending** order:
//! the first entry that exists on disk wins. Nothing is checked when a path is
//! added; existence is only tested by [`Locator::find_config`].
//!
//! # Default candidates
//!
//! [`Locator::add_default_files`] appends the conventional locations for a
//! config file, highest priority first:
//!
//! 1. the path in an environment variable (e.g. `MYAPP_CONFIG`), if set
//! 2. the current working directory
//! 3. `~/.config/{exe_name}/`
//! 4. the `etc` directory next to a `bin` directory holding the executable,
//!    e.g. `/usr/local/etc/` for `/usr/local/bin/myapp` (`/etc/` for
//!    `/bin/myapp`)
//! 5. `/etc/{exe_name}/`
//! 6. `/etc/`
//! 7. the directory holding the executable
//!
//! The order is part of the contract: deployments rely on it.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};

use tracing::debug;

use crate::exe::ExePath;

/// Process state the default candidates are derived from.
///
/// [`SearchContext::current`] captures the live process; tests build one by
/// hand.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    /// Environment variables by name.
    pub env_vars: HashMap<String, OsString>,
    /// Working directory, if known.
    pub cwd: Option<PathBuf>,
    /// Home directory, if known.
    pub home: Option<PathBuf>,
    /// The running executable.
    pub exe: ExePath,
}

impl SearchContext {
    pub fn current() -> Self {
        Self {
            env_vars: std::env::vars_os()
                .filter_map(|(key, value)| Some((key.into_string().ok()?, value)))
                .collect(),
            cwd: std::env::current_dir().ok(),
            home: directories::UserDirs::new().map(|user| user.home_dir().to_path_buf()),
            exe: ExePath::current(),
        }
    }

    fn non_empty_var(&self, name: &str) -> Option<&OsString> {
        self.env_vars.get(name).filter(|value| !value.is_empty())
    }
}

/// An ordered list of places a config file may live.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locator {
    candidates: Vec<PathBuf>,
}

impl Locator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of candidate paths added so far.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidate paths, highest priority first.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Forget all candidates so the locator can be reused.
    pub fn reset(&mut self) {
        self.candidates.clear();
    }

    /// Append a candidate path. Duplicates are kept.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        self.candidates.push(path.into());
    }

    /// The first candidate that exists, in insertion order.
    pub fn find_config(&self) -> Option<&Path> {
        let found = self
            .candidates
            .iter()
            .find(|path| std::fs::metadata(path).is_ok())
            .map(PathBuf::as_path);
        match found {
            Some(path) => debug!(path = %path.display(), "found config file"),
            None => debug!(candidates = self.candidates.len(), "no config file found"),
        }
        found
    }

    /// Add the default candidates named after the running executable:
    /// env var `{NAME}_CONFIG` and file `{name}.config`.
    pub fn add_defaults(&mut self) {
        self.add_defaults_with(&SearchContext::current());
    }

    /// Like [`add_defaults`](Self::add_defaults) with explicit process state.
    pub fn add_defaults_with(&mut self, ctx: &SearchContext) {
        let name = &ctx.exe.name;
        let env_name = format!("{}_CONFIG", name.to_uppercase());
        let file_name = format!("{name}.config");
        self.add_default_files_with(&env_name, &file_name, ctx);
    }

    /// Add the default candidates for `file_name`, with `env_name` naming an
    /// environment variable that may hold an explicit path. An empty
    /// `env_name` skips the environment lookup.
    pub fn add_default_files(&mut self, env_name: &str, file_name: &str) {
        self.add_default_files_with(env_name, file_name, &SearchContext::current());
    }

    /// Like [`add_default_files`](Self::add_default_files) with explicit
    /// process state.
    pub fn add_default_files_with(&mut self, env_name: &str, file_name: &str, ctx: &SearchContext) {
        if !env_name.is_empty()
            && let Some(path) = ctx.non_empty_var(env_name)
        {
            self.add_file(path);
        }

        let exe = &ctx.exe;

        if let Some(cwd) = &ctx.cwd {
            self.add_file(cwd.join(file_name));
        }

        if let Some(home) = &ctx.home {
            self.add_file(home.join(".config").join(&exe.name).join(file_name));
        }

        if let Some(etc) = etc_beside_bin(&exe.dir) {
            self.add_file(etc.join(file_name));
        }

        let etc = Path::new(MAIN_SEPARATOR_STR).join("etc");
        self.add_file(etc.join(&exe.name).join(file_name));
        self.add_file(etc.join(file_name));

        self.add_file(exe.dir.join(file_name));

        debug!(candidates = ?self.candidates, "config file candidates");
    }
}

/// `/prefix/bin/rest` → `/prefix/etc/rest`, replacing only the first `bin`
/// segment. The directory is compared with its trailing separator, so `/bin`
/// itself maps to `/etc/`. `None` when there is no `bin` segment.
fn etc_beside_bin(exe_dir: &Path) -> Option<PathBuf> {
    let sep = MAIN_SEPARATOR_STR;
    let Some(dir) = exe_dir.to_str() else {
        debug!(
            dir = %exe_dir.display(),
            "executable directory is not UTF-8, skipping etc candidate"
        );
        return None;
    };

    let dir = if dir.ends_with(sep) {
        dir.to_string()
    } else {
        format!("{dir}{sep}")
    };
    let bin = format!("{sep}bin{sep}");
    if !dir.contains(&bin) {
        return None;
    }
    Some(PathBuf::from(dir.replacen(&bin, &format!("{sep}etc{sep}"), 1)))
}
