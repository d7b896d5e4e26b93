//! Clap adapter for flagmaker.
//!
//! Compiled only with the `clap` Cargo feature (on by default). It turns a
//! bound [`FlagSet`] into a [`clap::Command`] with one long argument per
//! flag, so applications can lean on clap for help rendering, shell
//! completions or suggestions while flagmaker keeps owning the values.
//!
//! ```ignore
//! let mut cfg = Config::default();
//! let command = FlagMaker::default().command(&mut cfg, "myapp")?;
//! command.print_help()?;
//! ```

use clap::{Arg, ArgAction, Command};

use crate::bind::FlagSet;
use crate::value::Kind;

/// Build a clap command declaring every flag of `set`.
///
/// Booleans become `SetTrue` switches, sequences `Append` arguments, and
/// scalars with a non-zero bound value carry it as their default.
pub fn command_for(set: &FlagSet<'_>, name: &str) -> Command {
    let mut command = Command::new(name.to_string());
    if set.get("help").is_some() {
        command = command.disable_help_flag(true);
    }

    for binding in set.iter() {
        let kind = binding.kind();
        let mut arg = Arg::new(binding.name().to_string())
            .long(binding.name().to_string())
            .help(binding.usage());

        arg = match kind {
            Kind::Bool => arg.action(ArgAction::SetTrue),
            kind if kind.is_sequence() => arg
                .action(ArgAction::Append)
                .value_name(kind.type_name().to_uppercase()),
            kind => arg
                .action(ArgAction::Set)
                .value_name(kind.type_name().to_uppercase()),
        };

        let default = binding.default_value();
        if !kind.is_bool() && !kind.is_sequence() && !default.is_zero() {
            arg = arg.default_value(default.to_string());
        }
        command = command.arg(arg);
    }
    command
}
