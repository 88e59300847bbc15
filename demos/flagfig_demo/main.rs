//! # flagfig demo application
//!
//! A sample CLI tool that shows how to wire [flagfig](https://docs.rs/flagfig)
//! into a clap application. It exists purely to demonstrate and manually
//! verify flagfig's behavior.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example flagfig_demo
//! RUST_LOG=flagfig=debug cargo run --example flagfig_demo
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                 | How to exercise it                                                     |
//! |-------------------------|------------------------------------------------------------------------|
//! | Compiled defaults       | `cargo run --example flagfig_demo`                                     |
//! | Config file (cwd)       | Create `flagfig_demo.config` in cwd, then run                          |
//! | Config file (home)      | Place it at `~/.config/flagfig_demo/flagfig_demo.config`               |
//! | Env var file override   | `FLAGFIG_DEMO_CONFIG=/tmp/demo.toml cargo run --example flagfig_demo`  |
//! | Command line wins       | `cargo run --example flagfig_demo -- --port 9999`                      |
//! | Dashed flag names       | Set `retry_limit = 3` in the file to fill `--retry-limit`              |
//! | Candidate list          | `RUST_LOG=flagfig=debug cargo run --example flagfig_demo`              |
//!
//! A sample config file:
//!
//! ```toml
//! host = "0.0.0.0"
//! port = 3000
//! verbose = true
//! timeout = "30s"
//! retry_limit = 3
//! ```

use std::time::Duration;

use clap::{CommandFactory, FromArgMatches, Parser};
use tracing_subscriber::EnvFilter;

use flagfig::{ClapFlags, FlagKind, Flagfig};

/// flagfig demo: prints its effective settings and where they came from.
#[derive(Parser, Debug)]
#[command(name = "flagfig-demo")]
struct Cli {
    /// Host to bind.
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Port to bind.
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Enable verbose output.
    #[arg(long)]
    verbose: bool,

    /// Request timeout, e.g. "10s" or "1m 30s".
    #[arg(long, default_value = "5s", value_parser = humantime::parse_duration)]
    timeout: Duration,

    /// How many times to retry a failed request.
    #[arg(long, default_value_t = 0)]
    retry_limit: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut flags = match ClapFlags::new(Cli::command(), std::env::args_os()) {
        Ok(flags) => flags
            .kind("timeout", FlagKind::Duration)
            .kind("retry-limit", FlagKind::UnsignedInt),
        Err(e) => e.exit(),
    };

    let mut flagfig = Flagfig::with_defaults();
    let source = flagfig
        .parse(&mut flags)
        .map(|path| path.display().to_string());

    let cli = flags
        .try_get_matches()
        .and_then(|matches| Cli::from_arg_matches(&matches))
        .unwrap_or_else(|e| e.exit());

    match source {
        Some(path) => println!("config file: {path}"),
        None => println!("config file: (none found)"),
    }
    println!("host        = {}", cli.host);
    println!("port        = {}", cli.port);
    println!("verbose     = {}", cli.verbose);
    println!("timeout     = {}", humantime::format_duration(cli.timeout));
    println!("retry_limit = {}", cli.retry_limit);
}
