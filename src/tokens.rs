//! Command-line token parsing against a bound [`FlagSet`].
//!
//! Flags may be written `-name`, `--name`, `-name=value`, `--name=value` or
//! `-name value`. Boolean flags never take a separate value token. Parsing
//! stops at the first non-flag token, at a lone `-`, or after a `--`
//! terminator; everything from there on is returned as leftover.

use std::collections::VecDeque;

use crate::bind::FlagSet;
use crate::error::{FlagError, ParseError};

pub(crate) fn parse(set: &mut FlagSet<'_>, args: Vec<String>) -> Result<Vec<String>, ParseError> {
    let mut args = VecDeque::from(args);
    loop {
        match parse_one(set, &mut args) {
            Ok(true) => continue,
            Ok(false) => return Ok(args.into()),
            Err(kind) => return Err(ParseError::new(kind, args.into())),
        }
    }
}

/// Consume one flag from the front of `args`.
///
/// `Ok(false)` means parsing is over with nothing consumed beyond a `--`.
fn parse_one(set: &mut FlagSet<'_>, args: &mut VecDeque<String>) -> Result<bool, FlagError> {
    let Some(token) = args.front().cloned() else {
        return Ok(false);
    };
    if token.len() < 2 || !token.starts_with('-') {
        return Ok(false);
    }

    let body = match token.strip_prefix("--") {
        Some("") => {
            args.pop_front();
            return Ok(false);
        }
        Some(rest) => rest,
        None => &token[1..],
    };
    if body.starts_with(['-', '=']) {
        return Err(FlagError::BadFlagSyntax(token));
    }

    let (name, inline) = match body.char_indices().skip(1).find(|&(_, c)| c == '=') {
        Some((i, _)) => (body[..i].to_string(), Some(body[i + 1..].to_string())),
        None => (body.to_string(), None),
    };
    args.pop_front();
    log::trace!("flag -{name} value {inline:?}");

    let Some(binding) = set.get_mut(&name) else {
        if name == "help" || name == "h" {
            return Err(FlagError::HelpRequested);
        }
        return Err(FlagError::UnrecognizedFlag(name));
    };

    let value = if binding.kind().is_bool() {
        inline.unwrap_or_else(|| "true".to_string())
    } else {
        match inline {
            Some(value) => value,
            None => args
                .pop_front()
                .ok_or_else(|| FlagError::MissingValue(name.clone()))?,
        }
    };

    binding
        .set(&value)
        .map_err(|source| FlagError::InvalidValue {
            flag: name,
            value,
            source,
        })?;
    Ok(true)
}
