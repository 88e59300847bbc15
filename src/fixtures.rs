#[cfg(test)]
pub mod test {
    use std::collections::HashSet;
    use std::fmt;
    use std::str::FromStr;
    use std::time::Duration;

    use crate::registry::FlagRegistry;
    use crate::types::{Flag, FlagKind};

    /// A custom value type that parses and renders itself.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Level {
        Debug,
        Info,
        Warn,
    }

    impl FromStr for Level {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "debug" => Ok(Level::Debug),
                "info" => Ok(Level::Info),
                "warn" => Ok(Level::Warn),
                other => Err(format!("unknown level '{other}'")),
            }
        }
    }

    impl fmt::Display for Level {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let s = match self {
                Level::Debug => "debug",
                Level::Info => "info",
                Level::Warn => "warn",
            };
            f.write_str(s)
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum TestValue {
        Str(String),
        Int(i64),
        Int32(i32),
        Uint(u64),
        Uint32(u32),
        Float(f64),
        Bool(bool),
        Duration(Duration),
        Level(Level),
        List(Vec<String>),
    }

    impl TestValue {
        fn kind(&self) -> FlagKind {
            match self {
                TestValue::Str(_) => FlagKind::String,
                TestValue::Int(_) | TestValue::Int32(_) => FlagKind::SignedInt,
                TestValue::Uint(_) | TestValue::Uint32(_) => FlagKind::UnsignedInt,
                TestValue::Float(_) => FlagKind::Float,
                TestValue::Bool(_) => FlagKind::Bool,
                TestValue::Duration(_) => FlagKind::Duration,
                TestValue::Level(_) => FlagKind::SelfDescribing,
                TestValue::List(_) => FlagKind::Other("list"),
            }
        }

        fn parse_like(&self, s: &str) -> Result<TestValue, String> {
            fn reason<E: fmt::Display>(e: E) -> String {
                e.to_string()
            }
            Ok(match self {
                TestValue::Str(_) => TestValue::Str(s.to_string()),
                TestValue::Int(_) => TestValue::Int(s.parse().map_err(reason)?),
                TestValue::Int32(_) => TestValue::Int32(s.parse().map_err(reason)?),
                TestValue::Uint(_) => TestValue::Uint(s.parse().map_err(reason)?),
                TestValue::Uint32(_) => TestValue::Uint32(s.parse().map_err(reason)?),
                TestValue::Float(_) => TestValue::Float(s.parse().map_err(reason)?),
                TestValue::Bool(_) => TestValue::Bool(s.parse().map_err(reason)?),
                TestValue::Duration(_) => {
                    TestValue::Duration(humantime::parse_duration(s).map_err(reason)?)
                }
                TestValue::Level(_) => TestValue::Level(s.parse()?),
                TestValue::List(_) => return Err("lists cannot be set from text".into()),
            })
        }
    }

    struct Entry {
        name: String,
        value: TestValue,
        explicit: bool,
    }

    /// In-memory flag registry with typed values, in registration order.
    #[derive(Default)]
    pub struct TestFlags {
        entries: Vec<Entry>,
        pub set_calls: Vec<(String, String)>,
    }

    impl TestFlags {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register a flag holding its default value.
        pub fn with(mut self, name: &str, value: TestValue) -> Self {
            self.entries.push(Entry {
                name: name.to_string(),
                value,
                explicit: false,
            });
            self
        }

        /// Register a flag the user already set on the command line.
        pub fn explicit(mut self, name: &str, value: TestValue) -> Self {
            self.entries.push(Entry {
                name: name.to_string(),
                value,
                explicit: true,
            });
            self
        }

        pub fn get(&self, name: &str) -> &TestValue {
            &self
                .entries
                .iter()
                .find(|e| e.name == name)
                .unwrap_or_else(|| panic!("no flag named {name}"))
                .value
        }
    }

    impl FlagRegistry for TestFlags {
        fn flags(&self) -> Vec<Flag> {
            self.entries
                .iter()
                .map(|e| Flag::new(e.name.clone(), e.value.kind()))
                .collect()
        }

        fn explicit_flags(&self) -> HashSet<String> {
            self.entries
                .iter()
                .filter(|e| e.explicit)
                .map(|e| e.name.clone())
                .collect()
        }

        fn set(&mut self, name: &str, value: &str) -> Result<(), String> {
            self.set_calls.push((name.to_string(), value.to_string()));
            let entry = self
                .entries
                .iter_mut()
                .find(|e| e.name == name)
                .ok_or_else(|| format!("no flag named {name}"))?;
            entry.value = entry.value.parse_like(value)?;
            Ok(())
        }
    }

    #[test]
    fn explicit_flags_only_lists_user_set() {
        let flags = TestFlags::new()
            .with("a", TestValue::Int(0))
            .explicit("b", TestValue::Int(1));
        let explicit = flags.explicit_flags();
        assert!(explicit.contains("b"));
        assert!(!explicit.contains("a"));
    }

    #[test]
    fn set_rejects_out_of_range() {
        let mut flags = TestFlags::new().with("small", TestValue::Uint32(0));
        assert!(flags.set("small", "4294967296").is_err());
        assert_eq!(flags.get("small"), &TestValue::Uint32(0));
    }
}
