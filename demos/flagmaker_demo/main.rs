//! # flagmaker demo application
//!
//! Loads a small server configuration from TOML, then lets the command line
//! override any leaf of it.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example flagmaker_demo
//! cargo run --example flagmaker_demo -- --server.port 9000 --tags a --tags b
//! cargo run --example flagmaker_demo -- --flat --port 9000
//! cargo run --example flagmaker_demo -- -help
//! ```
//!
//! `--flat` (consumed before flagmaker sees the arguments) switches to
//! flattened names.

use std::process::ExitCode;
use std::time::Duration;

use serde::Deserialize;

use flagmaker::{FlagError, FlagMaker, Flags};

const DEFAULTS: &str = r#"
tags = ["prod"]

[server]
host = "localhost"
port = 8080
read_timeout = { secs = 5, nanos = 0 }

[display]
colour = "yellow"
verbose = false
"#;

#[derive(Flags, Deserialize, Debug)]
struct DemoConfig {
    pub server: Server,
    pub display: Display,
    /// Labels attached to every request.
    pub tags: Vec<String>,
}

#[derive(Flags, Deserialize, Debug)]
struct Server {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Read deadline per request.
    pub read_timeout: Duration,
}

#[derive(Flags, Deserialize, Debug)]
struct Display {
    /// Output color.
    #[serde(rename = "colour")]
    pub color: String,
    /// Print every resolved value.
    pub verbose: bool,
}

fn main() -> ExitCode {
    let mut cfg: DemoConfig = match toml::from_str(DEFAULTS) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("bad defaults: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let flat = args.first().is_some_and(|a| a == "--flat");
    if flat {
        args.remove(0);
    }
    let maker = FlagMaker::builder().flatten(flat).build();

    match maker.parse_args(&mut cfg, args) {
        Ok(rest) => {
            println!("{cfg:#?}");
            if !rest.is_empty() {
                println!("positional: {rest:?}");
            }
            ExitCode::SUCCESS
        }
        Err(err) if matches!(err.kind, FlagError::HelpRequested) => {
            match maker.usage(&mut cfg) {
                Ok(usage) => print!("Usage of flagmaker-demo:\n{usage}"),
                Err(e) => eprintln!("{e}"),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
