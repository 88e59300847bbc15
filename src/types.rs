/// How a flag's value is represented, which decides how a config value is
/// rendered before it reaches the flag's string setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Plain text. Expects a TOML string.
    String,
    /// A duration in the registry's own literal syntax (e.g. `"10s"`).
    /// TOML has no duration type, so this expects a string.
    Duration,
    /// Expects a TOML float.
    Float,
    /// Any signed integer width. Expects a TOML integer.
    SignedInt,
    /// Any unsigned integer width. Expects a TOML integer, reinterpreted as `u64`.
    UnsignedInt,
    /// Expects a TOML boolean.
    Bool,
    /// A value type that parses itself from text. Any TOML scalar is accepted
    /// and rendered through its own string form.
    SelfDescribing,
    /// A kind with no config mapping. Finding a config key for it is an error.
    Other(&'static str),
}

/// A registered flag as reported by a [`FlagRegistry`](crate::FlagRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub name: String,
    pub kind: FlagKind,
}

impl Flag {
    pub fn new(name: impl Into<String>, kind: FlagKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// The config key this flag reads: `.` and `-` become `_`.
    pub fn config_key(&self) -> String {
        config_key(&self.name)
    }
}

/// Map a flag name to its top-level config key.
pub fn config_key(flag_name: &str) -> String {
    flag_name.replace(['.', '-'], "_")
}
