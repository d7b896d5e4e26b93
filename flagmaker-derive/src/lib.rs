//! Derive macros for flagmaker
//!
//! This crate provides two derives:
//! - `#[derive(Flags)]` - Describe a struct with named fields as a tree of flags
//! - `#[derive(FlagValue)]` - Bind a single-field newtype through its inner value

use proc_macro::TokenStream;

mod attrs;
mod flag_value;
mod flags;

/// Derive `flagmaker::Flags` (and `flagmaker::Field`) for a struct with
/// named fields.
///
/// Every `pub` field becomes a member of the flag namespace. Fields without a
/// visibility modifier are recorded as private and never bound.
///
/// # Attributes
///
/// - `#[flag(rename = "...")]` - Use a different name segment for this member
/// - `#[flag(skip)]` - Leave the member out entirely (needed for types that do
///   not implement `Field`)
/// - `#[<key>(rename = "...")]` - Any other attribute carrying a `rename` is
///   captured too; `Options::tag_key` picks which one applies
///
/// `///` doc comments become the flag's usage text.
///
/// # Example
///
/// ```ignore
/// #[derive(Flags, Default)]
/// pub struct Logging {
///     /// Seconds between flushes.
///     pub interval: i64,
///     #[serde(rename = "file")]
///     pub path: String,
/// }
/// ```
#[proc_macro_derive(Flags, attributes(flag))]
pub fn derive_flags(input: TokenStream) -> TokenStream {
    flags::derive_flags_impl(input)
}

/// Derive `flagmaker::Field` for a newtype by delegating to its only field.
///
/// The newtype binds with the adapter of its storage shape and keeps its own
/// type after an override.
///
/// ```ignore
/// #[derive(FlagValue, Default)]
/// pub struct Hostname(String);
/// ```
#[proc_macro_derive(FlagValue)]
pub fn derive_flag_value(input: TokenStream) -> TokenStream {
    flag_value::derive_flag_value_impl(input)
}
