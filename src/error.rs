use thiserror::Error;

use crate::value::Kind;

#[derive(Debug, Error)]
pub enum FlagError {
    #[error("top level object cannot be nil")]
    NilTopLevel,

    #[error("top level object must be a pointer. {type_name} is passed")]
    NotAPointer { type_name: String },

    #[error("interface must have pointer underlying type. {type_name} is held")]
    InvalidTopLevel { type_name: String },

    #[error("flag redefined: {0}")]
    DuplicateFlagName(String),

    #[error("flag provided but not defined: -{0}")]
    UnrecognizedFlag(String),

    #[error("invalid value {value:?} for flag -{flag}: {source}")]
    InvalidValue {
        flag: String,
        value: String,
        source: ValueError,
    },

    #[error("flag needs an argument: -{0}")]
    MissingValue(String),

    #[error("bad flag syntax: {0}")]
    BadFlagSyntax(String),

    #[error("flag: help requested")]
    HelpRequested,

    #[error("Invalid options: {0}")]
    InvalidOptions(#[from] toml::de::Error),
}

/// Why a single token could not be turned into a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("parse error")]
    Syntax,

    #[error("value out of range")]
    Range,

    #[error("expected a {expected:?} value, found {found:?}")]
    Mismatch { expected: Kind, found: Kind },
}

/// A failed [`parse_args`](crate::parse_args) call.
///
/// Carries the tokens that were not consumed before the failure, so callers
/// can report or re-dispatch them.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: FlagError,
    pub leftover: Vec<String>,
}

impl ParseError {
    pub fn new(kind: FlagError, leftover: Vec<String>) -> Self {
        Self { kind, leftover }
    }
}
