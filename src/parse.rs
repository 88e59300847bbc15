use std::path::{Path, PathBuf};

use tracing::info;

use crate::coerce;
use crate::error::FlagfigError;
use crate::locator::Locator;
use crate::registry::FlagRegistry;

/// One-shot config loading: find the first existing candidate file and apply
/// it to a flag registry.
///
/// Owns a [`Locator`] and remembers which file the last parse used.
#[derive(Debug, Clone, Default)]
pub struct Flagfig {
    locator: Locator,
    filename: Option<PathBuf>,
}

impl Flagfig {
    /// Start with no candidates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the default candidates for the running executable.
    /// See [`Locator::add_defaults`].
    pub fn with_defaults() -> Self {
        let mut locator = Locator::new();
        locator.add_defaults();
        Self::from_locator(locator)
    }

    pub fn from_locator(locator: Locator) -> Self {
        Self {
            locator,
            filename: None,
        }
    }

    /// Append a candidate file.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.locator.add_file(path);
        self
    }

    /// Append the default candidates for `file_name` with override variable
    /// `env_name`. See [`Locator::add_default_files`].
    pub fn default_files(mut self, env_name: &str, file_name: &str) -> Self {
        self.locator.add_default_files(env_name, file_name);
        self
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn locator_mut(&mut self) -> &mut Locator {
        &mut self.locator
    }

    /// The file used by the last parse, if any was found.
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Apply the first existing candidate to `registry`.
    ///
    /// Returns the file that was applied, or `None` when no candidate exists.
    /// Fails with [`FlagfigError::NoCandidates`] when the locator is empty.
    pub fn try_parse<R: FlagRegistry + ?Sized>(
        &mut self,
        registry: &mut R,
    ) -> Result<Option<&Path>, FlagfigError> {
        if self.locator.is_empty() {
            return Err(FlagfigError::NoCandidates);
        }

        self.filename = self.locator.find_config().map(Path::to_path_buf);
        if let Some(path) = &self.filename {
            info!(path = %path.display(), "loading configuration");
            coerce::apply_file(path, registry)?;
        }
        Ok(self.filename.as_deref())
    }

    /// Like [`try_parse`](Self::try_parse), but prints the error and exits
    /// the process with status 1 on failure.
    pub fn parse<R: FlagRegistry + ?Sized>(&mut self, registry: &mut R) -> Option<&Path> {
        match self.try_parse(registry) {
            Ok(path) => path,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{TestFlags, TestValue};
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn registry() -> TestFlags {
        TestFlags::new()
            .with("string", TestValue::Str(String::new()))
            .with("int", TestValue::Int(0))
            .with("bool", TestValue::Bool(false))
            .with("duration", TestValue::Duration(Duration::from_secs(1)))
    }

    #[test]
    fn empty_locator_is_an_error() {
        let mut flagfig = Flagfig::new();
        let result = flagfig.try_parse(&mut registry());
        assert!(matches!(result, Err(FlagfigError::NoCandidates)));
    }

    #[test]
    fn no_existing_candidate_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let mut flags = registry();
        let mut flagfig = Flagfig::new().file(dir.path().join("missing.config"));

        assert_eq!(flagfig.try_parse(&mut flags).unwrap(), None);
        assert_eq!(flagfig.filename(), None);
        assert!(flags.set_calls.is_empty());
    }

    #[test]
    fn applies_first_existing_file() {
        let dir = TempDir::new().unwrap();
        let low = dir.path().join("low.config");
        let high = dir.path().join("high.config");
        fs::write(
            &high,
            "string = \"hello\"\nint = 32\nbool = true\nduration = \"10s\"\n",
        )
        .unwrap();
        fs::write(&low, "string = \"ignored\"\n").unwrap();

        let mut flags = registry();
        let mut flagfig = Flagfig::new()
            .file(dir.path().join("absent.config"))
            .file(&high)
            .file(&low);

        assert_eq!(flagfig.try_parse(&mut flags).unwrap(), Some(high.as_path()));
        assert_eq!(flagfig.filename(), Some(high.as_path()));
        assert_eq!(flags.get("string"), &TestValue::Str("hello".into()));
        assert_eq!(flags.get("int"), &TestValue::Int(32));
        assert_eq!(flags.get("bool"), &TestValue::Bool(true));
        assert_eq!(
            flags.get("duration"),
            &TestValue::Duration(Duration::from_secs(10))
        );
    }

    #[test]
    fn invalid_file_reports_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.config");
        fs::write(&path, "this is not toml").unwrap();

        let mut flagfig = Flagfig::new().file(&path);
        let result = flagfig.try_parse(&mut registry());
        assert!(matches!(result, Err(FlagfigError::Decode { .. })));
        // the chosen file is still recorded
        assert_eq!(flagfig.filename(), Some(path.as_path()));
    }

    #[test]
    fn directory_candidate_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let mut flagfig = Flagfig::new().file(dir.path());
        let result = flagfig.try_parse(&mut registry());
        assert!(matches!(result, Err(FlagfigError::Io { .. })));
    }

    #[test]
    fn parse_again_updates_filename() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.config");
        fs::write(&path, "int = 1\n").unwrap();

        let mut flags = registry();
        let mut flagfig = Flagfig::new().file(&path);
        assert_eq!(flagfig.parse(&mut flags), Some(path.as_path()));

        fs::remove_file(&path).unwrap();
        assert_eq!(flagfig.parse(&mut flags), None);
        assert_eq!(flagfig.filename(), None);
    }

    #[test]
    fn locator_mut_adds_candidates() {
        let mut flagfig = Flagfig::new();
        flagfig.locator_mut().add_file("a.config");
        assert_eq!(flagfig.locator().len(), 1);
    }

    #[test]
    fn with_defaults_has_candidates() {
        let flagfig = Flagfig::with_defaults();
        assert!(!flagfig.locator().is_empty());
        assert_eq!(flagfig.filename(), None);
    }
}
