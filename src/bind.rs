//! Flag binding: attach one writable location to every derived flag name.
//!
//! The binder walks a value in the same order as the [`Walker`] walks its
//! type. Absent indirection layers in front of a bindable leaf are filled in
//! with defaults along the way, so every [`Binding`] ends with a live
//! `&mut` to real storage.

use std::collections::HashMap;
use std::fmt::Write;

use crate::error::{FlagError, ValueError};
use crate::field::{Field, Flags, Member};
use crate::schema::{Walker, dotted, flag_name};
use crate::types::Options;
use crate::value::{self, Kind, Leaf, Value};

/// One flag bound to one storage location.
pub struct Binding<'a> {
    name: String,
    usage: &'static str,
    kind: Kind,
    default: Value,
    slot: &'a mut dyn Leaf,
    touched: bool,
}

impl<'a> Binding<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Usage text, taken from the member's doc comment.
    pub fn usage(&self) -> &'static str {
        self.usage
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The value the location held when it was bound.
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// The value the location holds now.
    pub fn value(&self) -> Value {
        self.slot.load()
    }

    /// Whether the flag has been set at least once.
    pub fn is_set(&self) -> bool {
        self.touched
    }

    /// Apply one occurrence of the flag.
    ///
    /// Scalars are overwritten. Sequences are replaced by the first occurrence
    /// and appended to by every later one. A token that does not parse leaves
    /// the location as it was.
    pub fn set(&mut self, token: &str) -> Result<(), ValueError> {
        let parsed = value::parse(self.kind, token)?;
        let next = if self.kind.is_sequence() && self.touched {
            let mut current = self.slot.load();
            current.extend(parsed)?;
            current
        } else {
            parsed
        };
        self.slot.store(next)?;
        self.touched = true;
        Ok(())
    }
}

impl std::fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .field("touched", &self.touched)
            .finish()
    }
}

/// Every binding of one target, indexed by flag name.
#[derive(Debug, Default)]
pub struct FlagSet<'a> {
    bindings: Vec<Binding<'a>>,
    index: HashMap<String, usize>,
}

impl<'a> FlagSet<'a> {
    fn insert(&mut self, binding: Binding<'a>) -> Result<(), FlagError> {
        if self.index.contains_key(&binding.name) {
            return Err(FlagError::DuplicateFlagName(binding.name));
        }
        self.index.insert(binding.name.clone(), self.bindings.len());
        self.bindings.push(binding);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Binding<'a>> {
        self.index.get(name).map(|&i| &self.bindings[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Binding<'a>> {
        self.index.get(name).map(|&i| &mut self.bindings[i])
    }

    /// Bindings in walk order.
    pub fn iter(&self) -> impl Iterator<Item = &Binding<'a>> {
        self.bindings.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.bindings.iter().map(|b| b.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Usage listing, one entry per flag, sorted by name.
    ///
    /// ```text
    ///   -logging.interval int
    ///     	poll interval (default 3)
    ///   -verbose
    ///     	chatty output
    /// ```
    pub fn usage(&self) -> String {
        let mut sorted: Vec<&Binding<'a>> = self.bindings.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut out = String::new();
        for binding in sorted {
            let mut line = format!("  -{}", binding.name);
            if !binding.kind.is_bool() {
                line.push(' ');
                line.push_str(binding.kind.type_name());
            }
            // Short single-letter flags keep usage on the same line.
            if line.len() <= 4 {
                line.push('\t');
            } else {
                line.push_str("\n    \t");
            }
            line.push_str(&binding.usage.replace('\n', "\n    \t"));
            if !binding.default.is_zero() {
                match &binding.default {
                    Value::Str(s) => {
                        let _ = write!(line, " (default {s:?})");
                    }
                    other => {
                        let _ = write!(line, " (default {other})");
                    }
                }
            }
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

/// Collects a [`FlagSet`] from `Flags::bind` / `Field::bind` calls.
pub struct Binder<'a> {
    tag_key: String,
    flatten: bool,
    path: Vec<String>,
    types: Vec<&'static str>,
    set: FlagSet<'a>,
    error: Option<FlagError>,
}

impl<'a> Binder<'a> {
    pub(crate) fn new(options: &Options) -> Self {
        Self {
            tag_key: options.tag_key.clone(),
            flatten: options.flatten,
            path: Vec::new(),
            types: Vec::new(),
            set: FlagSet::default(),
            error: None,
        }
    }

    pub(crate) fn bind_value(mut self, target: &'a mut dyn Flags) -> Result<FlagSet<'a>, FlagError> {
        self.types.push(target.type_name());
        target.bind(&mut self);
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.set),
        }
    }

    /// Bind a public member of type `F`.
    pub fn field<F: Field>(&mut self, member: Member, value: &'a mut F) {
        <F as Field>::bind(value, self, member);
    }

    pub fn leaf(&mut self, member: Member, slot: &'a mut dyn Leaf) {
        let segment = member.segment(&self.tag_key);
        let path = dotted(&self.path.join("."), &segment);
        let name = flag_name(&path, &segment, self.flatten);

        let kind = slot.kind();
        let default = slot.load();
        log::debug!("binding -{name} ({}) default {default}", kind.type_name());

        let binding = Binding {
            name,
            usage: member.doc,
            kind,
            default,
            slot,
            touched: false,
        };
        if let Err(err) = self.set.insert(binding) {
            self.error.get_or_insert(err);
        }
    }

    pub fn nested<T: Flags>(&mut self, member: Member, value: &'a mut T) {
        let type_name = std::any::type_name::<T>();
        if self.types.contains(&type_name) {
            return;
        }

        self.path.push(member.segment(&self.tag_key));
        self.types.push(type_name);
        <T as Flags>::bind(value, self);
        self.types.pop();
        self.path.pop();
    }

    /// Whether a value of type `T` at this position would yield any flag.
    ///
    /// Decides if an absent `Option<T>` layer is worth allocating.
    pub(crate) fn is_bindable<T: Field>(&self, member: Member) -> bool {
        let mut walker = Walker::seeded(&self.tag_key, self.types.clone());
        <T as Field>::describe(&mut walker, member);
        walker.finish().has_leaves()
    }
}
