//! Command-line overrides for nested configuration structures.
//!
//! Load your configuration however you like (a file, defaults, a service),
//! then let the command line override individual leaves. Every public leaf of
//! the structure becomes a flag named by its path:
//!
//! ```ignore
//! use flagmaker::Flags;
//!
//! #[derive(Flags, Default)]
//! pub struct Config {
//!     pub logging: Logging,
//!     pub network: Network,
//! }
//!
//! #[derive(Flags, Default)]
//! pub struct Logging {
//!     /// Seconds between flushes.
//!     pub interval: i64,
//!     pub path: String,
//! }
//!
//! let mut cfg: Config = load_from_somewhere();
//! let rest = flagmaker::parse_args(&mut cfg, ["--logging.interval", "2", "serve"])?;
//! assert_eq!(cfg.logging.interval, 2);
//! assert_eq!(rest, ["serve"]);
//! ```
//!
//! # Naming
//!
//! A flag's name is the dot-joined path of member names from the root,
//! lowercased: `network.tcp.socket.read_timeout`. Two things change that:
//!
//! - **Renames**: `#[serde(rename = "...")]` (or the attribute selected by
//!   [`Options::tag_key`]) and `#[flag(rename = "...")]` replace a member's
//!   segment. Renames apply to nested structures as well as leaves.
//! - **Flattening**: with [`Options::flatten`] each flag is named by its own
//!   segment alone (`read_timeout`). Names must then be unique; a collision is
//!   a [`FlagError::DuplicateFlagName`], reported before anything is touched.
//!
//! # What becomes a flag
//!
//! | Member type | Flag |
//! |-------------|------|
//! | `bool` | switch: `-v`, `-v=false` |
//! | integers, floats, `String`, `PathBuf` | one value |
//! | `std::time::Duration` | `300ms`, `1.5s`, `1h30m` |
//! | `Vec<i64>`, `Vec<f64>`, `Vec<String>` (and narrower widths) | repeatable |
//! | `Option<T>`, `Box<T>` | whatever `T` is, allocated on demand |
//! | `#[derive(Flags)]` structs | a namespace |
//! | `#[derive(FlagValue)]` newtypes | whatever the inner type is |
//! | maps, channels, function pointers, `#[flag(skip)]` | nothing |
//!
//! Members without `pub` never become flags.
//!
//! Repeatable flags replace the loaded list on their first occurrence and
//! append on every later one: loading `[1, 2]` and passing `--ports 3
//! --ports 4` yields `[3, 4]`.
//!
//! # Errors
//!
//! [`parse_args`] returns the leftover tokens after the last flag, or a
//! [`ParseError`] carrying both the [`FlagError`] and the tokens that were not
//! consumed. Overrides applied before a failing token stay applied.
//!
//! # Clap adapter
//!
//! With the `clap` feature (on by default),
//! [`FlagMaker::command`] describes the same flags as a [`clap::Command`] for
//! help rendering and completions.

extern crate self as flagmaker;

pub mod duration;
pub mod error;
pub mod types;

mod bind;
mod builder;
#[cfg(feature = "clap")]
mod cli;
mod field;
mod schema;
mod target;
mod tokens;
mod value;

#[cfg(test)]
mod fixtures;

pub use bind::{Binder, Binding, FlagSet};
pub use builder::{FlagMaker, FlagMakerBuilder, parse_args};
#[cfg(feature = "clap")]
pub use cli::command_for;
pub use error::{FlagError, ParseError, ValueError};
pub use field::{Field, Flags, Member};
pub use flagmaker_derive::{FlagValue, Flags};
pub use schema::{Node, NodeKind, Schema, Walker};
pub use target::Target;
pub use types::{DEFAULT_TAG_KEY, FLAG_TAG_KEY, Options};
pub use value::{Kind, Leaf, Value, parse};
