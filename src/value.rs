//! Value adapters: the closed set of storage shapes a flag can bind to.
//!
//! Every bindable member reduces to one [`Kind`]. Parsing a command-line token
//! ([`parse`]) and rendering a default (`Display` on [`Value`]) both dispatch
//! on the kind, never on the member's declared type, so newtypes and
//! converted types (`isize`, `PathBuf`, `Vec<i32>`, ...) share the adapter of
//! their storage shape. [`Leaf::store`] converts back into the declared type.

use std::fmt;
use std::num::IntErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use crate::duration;
use crate::error::ValueError;

/// Storage shape of a leaf member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Str,
    Duration,
    IntList,
    FloatList,
    StrList,
}

impl Kind {
    /// Whether each occurrence of the flag adds one element.
    pub fn is_sequence(self) -> bool {
        matches!(self, Kind::IntList | Kind::FloatList | Kind::StrList)
    }

    /// Whether the flag may appear without a value token.
    pub fn is_bool(self) -> bool {
        self == Kind::Bool
    }

    /// Placeholder used in usage listings.
    pub fn type_name(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::I8 | Kind::I16 | Kind::I32 | Kind::I64 => "int",
            Kind::U8 | Kind::U16 | Kind::U32 | Kind::U64 => "uint",
            Kind::F32 | Kind::F64 => "float",
            Kind::Str => "string",
            Kind::Duration => "duration",
            Kind::IntList | Kind::FloatList | Kind::StrList => "value",
        }
    }
}

/// One value in one storage shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(String),
    Duration(Duration),
    IntList(Vec<i64>),
    FloatList(Vec<f64>),
    StrList(Vec<String>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::Str(_) => Kind::Str,
            Value::Duration(_) => Kind::Duration,
            Value::IntList(_) => Kind::IntList,
            Value::FloatList(_) => Kind::FloatList,
            Value::StrList(_) => Kind::StrList,
        }
    }

    /// Whether this is the zero value of its shape.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Bool(v) => !v,
            Value::I8(v) => *v == 0,
            Value::I16(v) => *v == 0,
            Value::I32(v) => *v == 0,
            Value::I64(v) => *v == 0,
            Value::U8(v) => *v == 0,
            Value::U16(v) => *v == 0,
            Value::U32(v) => *v == 0,
            Value::U64(v) => *v == 0,
            Value::F32(v) => *v == 0.0,
            Value::F64(v) => *v == 0.0,
            Value::Str(v) => v.is_empty(),
            Value::Duration(v) => v.is_zero(),
            Value::IntList(v) => v.is_empty(),
            Value::FloatList(v) => v.is_empty(),
            Value::StrList(v) => v.is_empty(),
        }
    }

    /// Appends the elements of another sequence of the same shape.
    pub(crate) fn extend(&mut self, other: Value) -> Result<(), ValueError> {
        match (self, other) {
            (Value::IntList(a), Value::IntList(b)) => a.extend(b),
            (Value::FloatList(a), Value::FloatList(b)) => a.extend(b),
            (Value::StrList(a), Value::StrList(b)) => a.extend(b),
            (this, other) => return Err(mismatch(this.kind(), &other)),
        }
        Ok(())
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Str(v) => f.write_str(v),
            Value::Duration(v) => write!(f, "{}", humantime::format_duration(*v)),
            Value::IntList(v) => write_list(f, v),
            Value::FloatList(v) => write_list(f, v),
            Value::StrList(v) => write_list(f, v),
        }
    }
}

pub(crate) fn mismatch(expected: Kind, found: &Value) -> ValueError {
    ValueError::Mismatch {
        expected,
        found: found.kind(),
    }
}

// --- parsing ---

/// Parse one command-line token as a value of `kind`.
///
/// For sequence kinds the token is one element and the result is a
/// one-element sequence.
pub fn parse(kind: Kind, token: &str) -> Result<Value, ValueError> {
    Ok(match kind {
        Kind::Bool => Value::Bool(parse_bool(token)?),
        Kind::I8 => Value::I8(narrow(parse_signed(token)?)?),
        Kind::I16 => Value::I16(narrow(parse_signed(token)?)?),
        Kind::I32 => Value::I32(narrow(parse_signed(token)?)?),
        Kind::I64 => Value::I64(parse_signed(token)?),
        Kind::U8 => Value::U8(narrow(parse_unsigned(token)?)?),
        Kind::U16 => Value::U16(narrow(parse_unsigned(token)?)?),
        Kind::U32 => Value::U32(narrow(parse_unsigned(token)?)?),
        Kind::U64 => Value::U64(parse_unsigned(token)?),
        Kind::F32 => Value::F32(parse_float(token)?),
        Kind::F64 => Value::F64(parse_float(token)?),
        Kind::Str => Value::Str(token.to_string()),
        Kind::Duration => Value::Duration(duration::parse(token)?),
        Kind::IntList => Value::IntList(vec![parse_signed(token)?]),
        Kind::FloatList => Value::FloatList(vec![parse_float(token)?]),
        Kind::StrList => Value::StrList(vec![token.to_string()]),
    })
}

fn parse_bool(token: &str) -> Result<bool, ValueError> {
    match token {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ValueError::Syntax),
    }
}

/// Parse a float of the target width. A finite literal that overflows the
/// width is a range error; only a spelled-out infinity yields one.
fn parse_float<F: std::str::FromStr + Into<f64> + Copy>(token: &str) -> Result<F, ValueError> {
    let value: F = token.parse().map_err(|_| ValueError::Syntax)?;
    if Into::<f64>::into(value).is_infinite() && !is_infinity_literal(token) {
        return Err(ValueError::Range);
    }
    Ok(value)
}

fn is_infinity_literal(token: &str) -> bool {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn narrow_float(value: f64) -> Result<f32, ValueError> {
    let narrowed = value as f32;
    if narrowed.is_infinite() && value.is_finite() {
        return Err(ValueError::Range);
    }
    Ok(narrowed)
}

/// Split off a base prefix: `0x`, `0o`, `0b`, or a bare leading `0` (octal).
fn split_radix(digits: &str) -> (u32, &str) {
    fn prefixed<'a>(digits: &'a str, lower: &str, upper: &str) -> Option<&'a str> {
        digits
            .strip_prefix(lower)
            .or_else(|| digits.strip_prefix(upper))
    }

    if let Some(rest) = prefixed(digits, "0x", "0X") {
        (16, rest)
    } else if let Some(rest) = prefixed(digits, "0o", "0O") {
        (8, rest)
    } else if let Some(rest) = prefixed(digits, "0b", "0B") {
        (2, rest)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    }
}

fn parse_unsigned(token: &str) -> Result<u64, ValueError> {
    let (radix, body) = split_radix(token);
    if body.is_empty() || body.starts_with(['+', '-']) {
        return Err(ValueError::Syntax);
    }
    u64::from_str_radix(body, radix).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => ValueError::Range,
        _ => ValueError::Syntax,
    })
}

fn parse_signed(token: &str) -> Result<i64, ValueError> {
    let (negative, digits) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    let magnitude = i128::from(parse_unsigned(digits)?);
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).map_err(|_| ValueError::Range)
}

fn narrow<S, T: TryFrom<S>>(value: S) -> Result<T, ValueError> {
    T::try_from(value).map_err(|_| ValueError::Range)
}

// --- storage ---

/// A writable storage location of one [`Kind`].
///
/// `load` reads the current content in its storage shape; `store` writes a
/// value back, converting into the declared type. `store` validates before
/// writing: on error the location is left untouched.
pub trait Leaf {
    fn kind(&self) -> Kind;
    fn load(&self) -> Value;
    fn store(&mut self, value: Value) -> Result<(), ValueError>;
}

macro_rules! direct_leaf {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl Leaf for $ty {
            fn kind(&self) -> Kind {
                Kind::$variant
            }

            fn load(&self) -> Value {
                Value::$variant(self.clone())
            }

            fn store(&mut self, value: Value) -> Result<(), ValueError> {
                match value {
                    Value::$variant(v) => {
                        *self = v;
                        Ok(())
                    }
                    other => Err(mismatch(Kind::$variant, &other)),
                }
            }
        }
    )*};
}

direct_leaf! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => Str,
    Duration => Duration,
    Vec<i64> => IntList,
    Vec<f64> => FloatList,
    Vec<String> => StrList,
}

impl Leaf for isize {
    fn kind(&self) -> Kind {
        Kind::I64
    }

    fn load(&self) -> Value {
        Value::I64(*self as i64)
    }

    fn store(&mut self, value: Value) -> Result<(), ValueError> {
        match value {
            Value::I64(v) => {
                *self = narrow(v)?;
                Ok(())
            }
            other => Err(mismatch(Kind::I64, &other)),
        }
    }
}

impl Leaf for usize {
    fn kind(&self) -> Kind {
        Kind::U64
    }

    fn load(&self) -> Value {
        Value::U64(*self as u64)
    }

    fn store(&mut self, value: Value) -> Result<(), ValueError> {
        match value {
            Value::U64(v) => {
                *self = narrow(v)?;
                Ok(())
            }
            other => Err(mismatch(Kind::U64, &other)),
        }
    }
}

impl Leaf for PathBuf {
    fn kind(&self) -> Kind {
        Kind::Str
    }

    fn load(&self) -> Value {
        Value::Str(self.to_string_lossy().into_owned())
    }

    fn store(&mut self, value: Value) -> Result<(), ValueError> {
        match value {
            Value::Str(v) => {
                *self = PathBuf::from(v);
                Ok(())
            }
            other => Err(mismatch(Kind::Str, &other)),
        }
    }
}

impl Leaf for Vec<i32> {
    fn kind(&self) -> Kind {
        Kind::IntList
    }

    fn load(&self) -> Value {
        Value::IntList(self.iter().map(|&v| i64::from(v)).collect())
    }

    fn store(&mut self, value: Value) -> Result<(), ValueError> {
        match value {
            Value::IntList(v) => {
                *self = v.into_iter().map(narrow).collect::<Result<Vec<i32>, _>>()?;
                Ok(())
            }
            other => Err(mismatch(Kind::IntList, &other)),
        }
    }
}

impl Leaf for Vec<isize> {
    fn kind(&self) -> Kind {
        Kind::IntList
    }

    fn load(&self) -> Value {
        Value::IntList(self.iter().map(|&v| v as i64).collect())
    }

    fn store(&mut self, value: Value) -> Result<(), ValueError> {
        match value {
            Value::IntList(v) => {
                *self = v.into_iter().map(narrow).collect::<Result<Vec<isize>, _>>()?;
                Ok(())
            }
            other => Err(mismatch(Kind::IntList, &other)),
        }
    }
}

impl Leaf for Vec<f32> {
    fn kind(&self) -> Kind {
        Kind::FloatList
    }

    fn load(&self) -> Value {
        Value::FloatList(self.iter().map(|&v| f64::from(v)).collect())
    }

    fn store(&mut self, value: Value) -> Result<(), ValueError> {
        match value {
            Value::FloatList(v) => {
                *self = v
                    .into_iter()
                    .map(narrow_float)
                    .collect::<Result<Vec<f32>, _>>()?;
                Ok(())
            }
            other => Err(mismatch(Kind::FloatList, &other)),
        }
    }
}
