//! Fill command-line flag defaults from a TOML config file.
//!
//! Flagfig finds a config file by walking a list of conventional locations,
//! then sets every flag the user did **not** pass on the command line from the
//! matching top-level key in that file.
//!
//! ```ignore
//! let mut flags = ClapFlags::new(Cli::command(), std::env::args_os())?;
//! Flagfig::with_defaults().parse(&mut flags);
//! let cli = Cli::from_arg_matches(&flags.try_get_matches()?)?;
//! ```
//!
//! For an executable named `myapp`, that searches for `myapp.config` (or the
//! file named by `$MYAPP_CONFIG`) and applies the first one found.
//!
//! # Precedence
//!
//! ```text
//! Compiled defaults     declared with the flag
//!        ↑ overridden by
//! Config file           first existing candidate only
//!        ↑ overridden by
//! Command line          anything the user passed explicitly
//! ```
//!
//! Only one file is ever read. There is no merging across candidates: the
//! first existing path in the [`Locator`] wins outright.
//!
//! # Flag names and keys
//!
//! A flag reads the top-level key equal to its name with every `.` and `-`
//! replaced by `_`:
//!
//! | Flag | Config key |
//! |------|------------|
//! | `port` | `port` |
//! | `log-level` | `log_level` |
//! | `db.url` | `db_url` |
//!
//! Nested tables are never traversed. A flag with no matching key is left
//! alone.
//!
//! # Where the file is searched
//!
//! [`Locator::add_defaults`] derives everything from the executable's name.
//! For `/usr/local/bin/myapp` the candidates are, highest priority first:
//!
//! 1. `$MYAPP_CONFIG`, if set and non-empty
//! 2. `./myapp.config`
//! 3. `~/.config/myapp/myapp.config`
//! 4. `/usr/local/etc/myapp.config` (only when the binary lives under a `bin`
//!    directory; `/bin` itself maps to `/etc`)
//! 5. `/etc/myapp/myapp.config`
//! 6. `/etc/myapp.config`
//! 7. `/usr/local/bin/myapp.config`
//!
//! Use [`Locator::add_default_files`] to pick your own variable and file name,
//! or [`Locator::add_file`] for arbitrary paths. Candidates are never checked
//! when added, only when [`Locator::find_config`] runs.
//!
//! # Value coercion
//!
//! Flags are set through their string form, so each config value is rendered
//! according to the flag's [`FlagKind`]:
//!
//! | Kind | TOML value | Rendered as |
//! |------|------------|-------------|
//! | `String` | string | verbatim |
//! | `Duration` | string (`"10s"`) | verbatim, parsed by the flag |
//! | `Float` | float | shortest round-trip form |
//! | `SignedInt` | integer | base 10 |
//! | `UnsignedInt` | integer | base 10, as `u64` |
//! | `Bool` | boolean | `true` / `false` |
//! | `SelfDescribing` | any scalar | its own string form |
//! | `Other` | any | always an error |
//!
//! A value of the wrong TOML type, or one the flag rejects, stops the whole
//! pass: flags applied before it keep their new values, flags after it are not
//! touched.
//!
//! # No CLI framework required
//!
//! The engine talks to flags only through the [`FlagRegistry`] trait. The
//! `clap` Cargo feature (on by default) adds [`ClapFlags`], a registry over a
//! clap `Command`. To use flagfig with another parser:
//!
//! ```toml
//! flagfig = { version = "...", default-features = false }
//! ```
//!
//! # Error handling
//!
//! Library operations return [`FlagfigError`]. [`Flagfig::parse`] is the
//! exception: it prints the error and exits, for programs that can't run
//! without their config. Use [`Flagfig::try_parse`] to handle errors yourself.

pub mod error;
pub mod types;

mod coerce;
#[cfg(feature = "clap")]
mod cli;
mod exe;
mod locator;
mod parse;
mod registry;

#[cfg(test)]
mod fixtures;

#[cfg(feature = "clap")]
pub use cli::ClapFlags;
pub use coerce::{apply_config, apply_file, apply_table};
pub use error::FlagfigError;
pub use exe::ExePath;
pub use locator::{Locator, SearchContext};
pub use parse::Flagfig;
pub use registry::FlagRegistry;
pub use types::{Flag, FlagKind, config_key};
