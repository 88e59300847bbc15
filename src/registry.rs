//! The flag registry seam.
//!
//! Flagfig doesn't own flags. Any flag store (a clap `Command`, a hand-rolled
//! flag set, a test double) plugs in by implementing [`FlagRegistry`]. The
//! coercion engine only needs four things from it: list every flag, list the
//! flags the user already set, report each flag's [`FlagKind`], and set a flag
//! from its string form.

use std::collections::HashSet;

use crate::types::Flag;

/// A store of command-line flags that config values can be applied to.
pub trait FlagRegistry {
    /// Every registered flag, in the order config values should be applied.
    fn flags(&self) -> Vec<Flag>;

    /// Names of flags the user set explicitly. These are never overwritten.
    fn explicit_flags(&self) -> HashSet<String>;

    /// Set flag `name` from its string representation.
    ///
    /// Returns a human-readable reason when the text is rejected.
    fn set(&mut self, name: &str, value: &str) -> Result<(), String>;
}
