//! Clap adapter for flagfig.
//!
//! This module is the **optional integration layer** between flagfig's
//! framework-agnostic core and the [clap](https://docs.rs/clap) CLI parser.
//! It is compiled only when the `clap` Cargo feature is enabled (on by
//! default).
//!
//! [`ClapFlags`] wraps a [`Command`] and the process arguments and implements
//! [`FlagRegistry`] over them. Config values never touch the parsed matches
//! directly: each accepted value becomes the argument's default value, so a
//! final parse with [`ClapFlags::try_get_matches`] lets command-line values
//! win over config values, which win over compiled defaults.
//!
//! ```ignore
//! let mut flags = ClapFlags::new(Cli::command(), std::env::args_os())?;
//! Flagfig::with_defaults().parse(&mut flags);
//! let cli = Cli::from_arg_matches(&flags.try_get_matches()?)?;
//! ```

use std::collections::HashSet;
use std::ffi::OsString;

use clap::builder::ValueParser;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::registry::FlagRegistry;
use crate::types::{Flag, FlagKind};

struct ClapFlag {
    id: String,
    name: String,
    kind: FlagKind,
    action: ArgAction,
    parser: ValueParser,
}

impl ClapFlag {
    fn from_arg(arg: &Arg) -> Self {
        let id = arg.get_id().as_str().to_string();
        let name = arg.get_long().unwrap_or(&id).to_string();
        Self {
            kind: infer_kind(arg.get_action()),
            action: arg.get_action().clone(),
            parser: arg.get_value_parser().clone(),
            id,
            name,
        }
    }

    /// Check `value` against the argument's own parser without touching the
    /// real command.
    fn validate(&self, value: &str) -> Result<(), String> {
        match self.action {
            ArgAction::SetTrue | ArgAction::SetFalse => {
                value.parse::<bool>().map(drop).map_err(|e| e.to_string())
            }
            ArgAction::Count => value.parse::<u8>().map(drop).map_err(|e| e.to_string()),
            _ => {
                let probe = Arg::new(self.id.clone())
                    .long(self.name.clone())
                    .action(self.action.clone())
                    .value_parser(self.parser.clone());
                Command::new("flagfig")
                    .no_binary_name(true)
                    .disable_help_flag(true)
                    .disable_version_flag(true)
                    .arg(probe)
                    .try_get_matches_from([format!("--{}={value}", self.name)])
                    .map(drop)
                    .map_err(|e| first_line(&e))
            }
        }
    }
}

fn infer_kind(action: &ArgAction) -> FlagKind {
    match action {
        ArgAction::SetTrue | ArgAction::SetFalse => FlagKind::Bool,
        ArgAction::Count => FlagKind::UnsignedInt,
        ArgAction::Append => FlagKind::Other("list"),
        _ => FlagKind::SelfDescribing,
    }
}

fn is_builtin(action: &ArgAction) -> bool {
    matches!(
        action,
        ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
    )
}

fn first_line(err: &clap::Error) -> String {
    let text = err.to_string();
    let line = text.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

/// A [`FlagRegistry`] over a clap [`Command`] and its arguments.
///
/// Every named (non-positional) argument of the top-level command is a flag,
/// except help and version. A flag's name is its long name, falling back to
/// its id. Flags given on the command line or through their `env` variable
/// count as explicitly set.
///
/// Kinds are inferred from the argument's action: `SetTrue`/`SetFalse` are
/// [`Bool`](FlagKind::Bool), `Count` is [`UnsignedInt`](FlagKind::UnsignedInt),
/// `Append` is unsupported, and everything else is
/// [`SelfDescribing`](FlagKind::SelfDescribing) (the argument's value parser
/// does the typing). Use [`kind()`](Self::kind) to be stricter.
pub struct ClapFlags {
    command: Command,
    args: Vec<OsString>,
    flags: Vec<ClapFlag>,
    explicit: HashSet<String>,
    defaults: Vec<(String, String)>,
}

impl ClapFlags {
    /// Snapshot which flags `args` sets explicitly.
    ///
    /// `args` includes the binary name, as with `std::env::args_os()`. Parse
    /// errors are ignored here (a required flag may still come from the
    /// config file) except help and version requests, which are returned so
    /// the caller can `exit()` on them.
    pub fn new<I, T>(command: Command, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

        let mut built = command.clone();
        built.build();
        let matches = built
            .clone()
            .ignore_errors(true)
            .try_get_matches_from(args.iter())?;

        let flags: Vec<ClapFlag> = built
            .get_arguments()
            .filter(|arg| !arg.is_positional() && !is_builtin(arg.get_action()))
            .map(ClapFlag::from_arg)
            .collect();

        let explicit = flags
            .iter()
            .filter(|flag| {
                matches!(
                    matches.value_source(&flag.id),
                    Some(ValueSource::CommandLine | ValueSource::EnvVariable)
                )
            })
            .map(|flag| flag.name.clone())
            .collect();

        Ok(Self {
            command,
            args,
            flags,
            explicit,
            defaults: Vec::new(),
        })
    }

    /// Override the inferred kind of flag `name` (long name or id).
    /// Unknown names are ignored.
    pub fn kind(mut self, name: &str, kind: FlagKind) -> Self {
        if let Some(flag) = self
            .flags
            .iter_mut()
            .find(|f| f.name == name || f.id == name)
        {
            flag.kind = kind;
        }
        self
    }

    /// Config values accepted so far, as `(arg id, value)` pairs.
    pub fn config_defaults(&self) -> &[(String, String)] {
        &self.defaults
    }

    /// The command with every accepted config value installed as a default.
    pub fn into_command(self) -> Command {
        self.defaults
            .into_iter()
            .fold(self.command, |cmd, (id, value)| {
                cmd.mut_arg(id, move |arg| arg.default_value(value))
            })
    }

    /// Parse the stored arguments against [`into_command()`](Self::into_command).
    pub fn try_get_matches(self) -> Result<ArgMatches, clap::Error> {
        let args = self.args.clone();
        self.into_command().try_get_matches_from(args)
    }
}

impl FlagRegistry for ClapFlags {
    fn flags(&self) -> Vec<Flag> {
        self.flags
            .iter()
            .map(|f| Flag::new(f.name.clone(), f.kind))
            .collect()
    }

    fn explicit_flags(&self) -> HashSet<String> {
        self.explicit.clone()
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), String> {
        let flag = self
            .flags
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| format!("no flag named '{name}'"))?;
        flag.validate(value)?;

        let id = flag.id.clone();
        self.defaults.retain(|(existing, _)| *existing != id);
        self.defaults.push((id, value.to_string()));
        Ok(())
    }
}
