//! The top-level value handed to [`parse_args`](crate::parse_args).
//!
//! Only a live mutable reference can receive flag values. The other shapes
//! exist so callers that hold something less (an absent value, a plain
//! value, a boxed wrapper around either) get a descriptive error rather than
//! a silent no-op.

use crate::error::FlagError;
use crate::field::Flags;

pub enum Target<'a> {
    /// A writable structure.
    Ref(&'a mut dyn Flags),
    /// An absent structure.
    Nil,
    /// A structure passed by value; only its type name survives.
    Value(&'static str),
    /// A type-erased wrapper around another target.
    Dyn(Box<Target<'a>>),
}

impl<'a> Target<'a> {
    /// A structure passed by value. Flags bound to it could never be observed
    /// by the caller, so it always resolves to [`FlagError::NotAPointer`].
    pub fn by_value<T: Flags>(value: T) -> Self {
        Target::Value(value.type_name())
    }

    /// Wrap a target behind one layer of type erasure.
    pub fn dynamic(inner: impl Into<Target<'a>>) -> Self {
        Target::Dyn(Box::new(inner.into()))
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Target::Ref(value) => value.type_name(),
            Target::Nil => "nil",
            Target::Value(name) => *name,
            Target::Dyn(inner) => inner.type_name(),
        }
    }

    /// The writable structure behind this target.
    pub(crate) fn resolve(self) -> Result<&'a mut dyn Flags, FlagError> {
        match self {
            Target::Ref(value) => Ok(value),
            Target::Nil => Err(FlagError::NilTopLevel),
            Target::Value(type_name) => Err(FlagError::NotAPointer {
                type_name: type_name.to_string(),
            }),
            Target::Dyn(inner) => inner.resolve_dyn(),
        }
    }

    fn resolve_dyn(self) -> Result<&'a mut dyn Flags, FlagError> {
        match self {
            Target::Value(type_name) => Err(FlagError::InvalidTopLevel {
                type_name: type_name.to_string(),
            }),
            other => other.resolve(),
        }
    }
}

impl<'a, T: Flags> From<&'a mut T> for Target<'a> {
    fn from(value: &'a mut T) -> Self {
        Target::Ref(value)
    }
}

impl<'a, T: Flags> From<Option<&'a mut T>> for Target<'a> {
    fn from(value: Option<&'a mut T>) -> Self {
        match value {
            Some(value) => Target::Ref(value),
            None => Target::Nil,
        }
    }
}

impl std::fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Ref(value) => f.debug_tuple("Ref").field(&value.type_name()).finish(),
            Target::Nil => f.write_str("Nil"),
            Target::Value(name) => f.debug_tuple("Value").field(name).finish(),
            Target::Dyn(inner) => f.debug_tuple("Dyn").field(inner).finish(),
        }
    }
}
