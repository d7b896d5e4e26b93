//! The two traits a type implements to take part in flag derivation.
//!
//! [`Flags`] is implemented by structures (normally via `#[derive(Flags)]`);
//! [`Field`] by every type that can appear as a member of one. Both have a
//! type-level half, driven by the [`Walker`], and an instance half that hands
//! writable locations to the [`Binder`].
//!
//! Member types fall into four groups:
//!
//! - **Leaves**: every type implementing [`Leaf`](crate::Leaf): `bool`, the integer and
//!   float widths, `String`, `PathBuf`, `Duration` and the supported `Vec`s.
//! - **Indirection**: `Option<T>` and `Box<T>`, one layer each. A `None`
//!   layer in front of something bindable is filled with `T::default()` when
//!   flags are bound.
//! - **Nested structures**: anything deriving `Flags`.
//! - **Unsupported**: maps, channels and function pointers. They produce no
//!   flag.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, SyncSender};
use std::time::Duration;

use crate::bind::Binder;
use crate::schema::Walker;
use crate::types::FLAG_TAG_KEY;
use crate::value::Kind;

/// A structure whose members map onto flags.
pub trait Flags {
    /// Describe every member of `Self` to the schema walker.
    fn describe(walker: &mut Walker)
    where
        Self: Sized;

    /// Object-safe form of [`describe`](Flags::describe).
    fn describe_value(&self, walker: &mut Walker);

    /// Hand a writable location for every public member to the binder.
    fn bind<'a>(&'a mut self, binder: &mut Binder<'a>);

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A type that can appear as a member of a [`Flags`] structure.
pub trait Field {
    fn describe(walker: &mut Walker, member: Member);

    fn bind<'a>(&'a mut self, binder: &mut Binder<'a>, member: Member);
}

/// Static description of one struct member, as written by the derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    /// Declared field name.
    pub name: &'static str,
    /// `(attribute key, renamed segment)` pairs.
    pub tags: &'static [(&'static str, &'static str)],
    /// Doc comment, used as usage text.
    pub doc: &'static str,
    /// Indirection layers crossed so far.
    pub depth: usize,
}

impl Member {
    pub const fn new(
        name: &'static str,
        tags: &'static [(&'static str, &'static str)],
        doc: &'static str,
    ) -> Self {
        Self {
            name,
            tags,
            doc,
            depth: 0,
        }
    }

    /// The same member one pointer layer further in.
    pub fn indirect(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    /// Name segment under the given tag key.
    ///
    /// The rename from `tag_key` wins, then `#[flag(rename)]`, then the
    /// lowercased field name.
    pub fn segment(&self, tag_key: &str) -> String {
        self.tag(tag_key)
            .or_else(|| self.tag(FLAG_TAG_KEY))
            .map(str::to_string)
            .unwrap_or_else(|| self.name.to_lowercase())
    }
}

macro_rules! leaf_fields {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl Field for $ty {
            fn describe(walker: &mut Walker, member: Member) {
                walker.leaf(member, Kind::$kind);
            }

            fn bind<'a>(&'a mut self, binder: &mut Binder<'a>, member: Member) {
                binder.leaf(member, self);
            }
        }
    )*};
}

leaf_fields! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => U64,
    f32 => F32,
    f64 => F64,
    String => Str,
    PathBuf => Str,
    Duration => Duration,
    Vec<i64> => IntList,
    Vec<i32> => IntList,
    Vec<isize> => IntList,
    Vec<f64> => FloatList,
    Vec<f32> => FloatList,
    Vec<String> => StrList,
}

impl<T: Field + Default> Field for Option<T> {
    fn describe(walker: &mut Walker, member: Member) {
        <T as Field>::describe(walker, member.indirect());
    }

    fn bind<'a>(&'a mut self, binder: &mut Binder<'a>, member: Member) {
        if self.is_none() {
            if !binder.is_bindable::<T>(member) {
                log::trace!("leaving {} unallocated: nothing to bind", member.name);
                return;
            }
            log::debug!(
                "allocating {} for {} at depth {}",
                std::any::type_name::<T>(),
                member.name,
                member.depth + 1
            );
        }
        let inner = self.get_or_insert_with(T::default);
        <T as Field>::bind(inner, binder, member.indirect());
    }
}

impl<T: Field> Field for Box<T> {
    fn describe(walker: &mut Walker, member: Member) {
        <T as Field>::describe(walker, member.indirect());
    }

    fn bind<'a>(&'a mut self, binder: &mut Binder<'a>, member: Member) {
        <T as Field>::bind(&mut **self, binder, member.indirect());
    }
}

macro_rules! unsupported_fields {
    ($(impl<$($param:ident),*> for $ty:ty;)*) => {$(
        impl<$($param),*> Field for $ty {
            fn describe(walker: &mut Walker, member: Member) {
                walker.unsupported(member);
            }

            fn bind<'a>(&'a mut self, _binder: &mut Binder<'a>, _member: Member) {}
        }
    )*};
}

unsupported_fields! {
    impl<K, V, S> for HashMap<K, V, S>;
    impl<K, V> for BTreeMap<K, V>;
    impl<T> for Sender<T>;
    impl<T> for SyncSender<T>;
    impl<T> for Receiver<T>;
    impl<A, R> for fn(A) -> R;
    impl<R> for fn() -> R;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_lowercases_field_name() {
        let member = Member::new("ReadTimeout", &[], "");
        assert_eq!(member.segment("serde"), "readtimeout");
    }

    #[test]
    fn segment_prefers_selected_tag() {
        let member = Member::new("name", &[("serde", "label"), ("flag", "title")], "");
        assert_eq!(member.segment("serde"), "label");
        assert_eq!(member.segment("yaml"), "title");
        assert_eq!(member.segment("flag"), "title");
    }

    #[test]
    fn segment_falls_back_without_flag_rename() {
        let member = Member::new("name", &[("serde", "label")], "");
        assert_eq!(member.segment("yaml"), "name");
    }

    #[test]
    fn indirect_counts_layers() {
        let member = Member::new("f1", &[], "").indirect().indirect();
        assert_eq!(member.depth, 2);
        assert_eq!(member.name, "f1");
    }
}
