//! Schema walking: derive the flag namespace from a type's shape.
//!
//! The walk is type-level. It never touches a value, so everything it can
//! reject (duplicate names) is rejected before any storage is allocated or
//! written.
//!
//! ```text
//! struct Cfg { logging: Logging, network: Network }
//!
//! Schema
//!  ├─ logging   Nested
//!  │   ├─ interval  Leaf(I64)
//!  │   └─ path      Leaf(Str)
//!  └─ network   Nested
//!      └─ ...
//! ```
//!
//! Flag names are produced depth-first, pre-order, in declaration order:
//! `logging.interval`, `logging.path`, `network....`.

use std::collections::HashSet;

use crate::error::FlagError;
use crate::field::{Field, Flags, Member};
use crate::value::Kind;

/// The namespace tree of one structure type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    pub nodes: Vec<Node>,
}

/// One struct member.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub segment: String,
    /// Pointer layers in front of the member's storage.
    pub depth: usize,
    pub doc: &'static str,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Nested(Vec<Node>),
    Leaf(Kind),
    /// No adapter for this shape, or cut because it re-enters its own type.
    Unsupported,
    /// Not `pub`; never bound.
    Private,
}

impl Schema {
    /// Flag names of every leaf, in pre-order.
    ///
    /// In flattened mode each name is the leaf's own segment. Two leaves with
    /// the same name fail with [`FlagError::DuplicateFlagName`].
    pub fn flag_names(&self, flatten: bool) -> Result<Vec<String>, FlagError> {
        let mut names = Vec::new();
        let mut seen = HashSet::new();
        collect_names(&self.nodes, "", flatten, &mut names, &mut seen)?;
        Ok(names)
    }

    pub fn has_leaves(&self) -> bool {
        fn any_leaf(nodes: &[Node]) -> bool {
            nodes.iter().any(|node| match &node.kind {
                NodeKind::Leaf(_) => true,
                NodeKind::Nested(children) => any_leaf(children),
                NodeKind::Unsupported | NodeKind::Private => false,
            })
        }
        any_leaf(&self.nodes)
    }
}

fn collect_names(
    nodes: &[Node],
    prefix: &str,
    flatten: bool,
    names: &mut Vec<String>,
    seen: &mut HashSet<String>,
) -> Result<(), FlagError> {
    for node in nodes {
        let path = dotted(prefix, &node.segment);
        match &node.kind {
            NodeKind::Nested(children) => collect_names(children, &path, flatten, names, seen)?,
            NodeKind::Leaf(_) => {
                let name = flag_name(&path, &node.segment, flatten);
                if !seen.insert(name.clone()) {
                    return Err(FlagError::DuplicateFlagName(name));
                }
                names.push(name);
            }
            NodeKind::Unsupported | NodeKind::Private => {}
        }
    }
    Ok(())
}

pub(crate) fn dotted(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

pub(crate) fn flag_name(path: &str, segment: &str, flatten: bool) -> String {
    if flatten {
        segment.to_string()
    } else {
        path.to_string()
    }
}

/// Builds a [`Schema`] from `Flags::describe` / `Field::describe` calls.
pub struct Walker {
    tag_key: String,
    frames: Vec<Vec<Node>>,
    /// Structure types currently being described, outermost first.
    types: Vec<&'static str>,
}

impl Walker {
    pub(crate) fn new(tag_key: &str) -> Self {
        Self::seeded(tag_key, Vec::new())
    }

    /// A walker that treats `types` as already entered.
    pub(crate) fn seeded(tag_key: &str, types: Vec<&'static str>) -> Self {
        Self {
            tag_key: tag_key.to_string(),
            frames: vec![Vec::new()],
            types,
        }
    }

    pub(crate) fn walk<T: Flags>(mut self) -> Schema {
        self.types.push(std::any::type_name::<T>());
        <T as Flags>::describe(&mut self);
        self.finish()
    }

    pub(crate) fn walk_value(mut self, value: &dyn Flags) -> Schema {
        self.types.push(value.type_name());
        value.describe_value(&mut self);
        self.finish()
    }

    pub(crate) fn finish(mut self) -> Schema {
        Schema {
            nodes: self.frames.pop().unwrap_or_default(),
        }
    }

    /// Describe a public member of type `F`.
    pub fn field<F: Field>(&mut self, member: Member) {
        <F as Field>::describe(self, member);
    }

    pub fn leaf(&mut self, member: Member, kind: Kind) {
        self.push(member, NodeKind::Leaf(kind));
    }

    pub fn nested<T: Flags>(&mut self, member: Member) {
        let type_name = std::any::type_name::<T>();
        if self.types.contains(&type_name) {
            log::trace!("{} re-enters {type_name}; not descending", member.name);
            self.unsupported(member);
            return;
        }

        self.types.push(type_name);
        self.frames.push(Vec::new());
        <T as Flags>::describe(self);
        let children = self.frames.pop().unwrap_or_default();
        self.types.pop();

        self.push(member, NodeKind::Nested(children));
    }

    pub fn unsupported(&mut self, member: Member) {
        log::trace!("{} has no flag adapter; skipping", member.name);
        self.push(member, NodeKind::Unsupported);
    }

    pub fn private(&mut self, member: Member) {
        log::trace!("{} is private; skipping", member.name);
        self.push(member, NodeKind::Private);
    }

    fn push(&mut self, member: Member, kind: NodeKind) {
        let node = Node {
            segment: member.segment(&self.tag_key),
            depth: member.depth,
            doc: member.doc,
            kind,
        };
        if let Some(frame) = self.frames.last_mut() {
            frame.push(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{Cfg1, Cfg2, Dd, Linked, Shapes};
    use crate::types::DEFAULT_TAG_KEY;

    fn schema<T: Flags>() -> Schema {
        Walker::new(DEFAULT_TAG_KEY).walk::<T>()
    }

    #[test]
    fn namespaced_names_follow_declaration_order() {
        let names = schema::<Cfg1>().flag_names(false).unwrap();
        assert_eq!(
            names,
            vec![
                "logging.interval",
                "logging.path",
                "network.read_timeout",
                "network.write_timeout",
                "network.tcp.read_timeout",
                "network.tcp.socket.read_timeout",
                "network.tcp.socket.write_timeout",
            ]
        );
    }

    #[test]
    fn flattened_names_drop_ancestors() {
        let names = schema::<Cfg2>().flag_names(true).unwrap();
        assert_eq!(
            names,
            vec![
                "interval",
                "path",
                "db_name",
                "table_name",
                "user",
                "password",
                "token",
                "tag",
            ]
        );
    }

    #[test]
    fn flattened_collision_is_duplicate() {
        let err = schema::<Cfg1>().flag_names(true).unwrap_err();
        assert!(matches!(err, FlagError::DuplicateFlagName(ref name) if name == "read_timeout"));
    }

    #[test]
    fn walking_twice_is_deterministic() {
        assert_eq!(schema::<Dd>(), schema::<Dd>());
        assert_eq!(
            schema::<Dd>().flag_names(false).unwrap(),
            schema::<Dd>().flag_names(false).unwrap()
        );
    }

    #[test]
    fn records_indirection_depth() {
        let schema = schema::<Dd>();
        let NodeKind::Nested(d1) = &schema.nodes[0].kind else {
            panic!("d1 should be nested");
        };
        assert_eq!(d1[0].segment, "f1");
        assert_eq!(d1[0].depth, 8);
        assert_eq!(d1[0].kind, NodeKind::Leaf(Kind::Str));
        assert_eq!(d1[1].depth, 6);
        assert_eq!(d1[1].kind, NodeKind::Leaf(Kind::IntList));
    }

    #[test]
    fn classifies_private_and_unsupported_members() {
        let schema = schema::<Shapes>();
        let kinds: Vec<_> = schema
            .nodes
            .iter()
            .map(|node| (node.segment.as_str(), node.kind.clone()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("env", NodeKind::Unsupported),
                ("hook", NodeKind::Unsupported),
                ("level", NodeKind::Leaf(Kind::I64)),
                ("secret", NodeKind::Private),
                ("ignored", NodeKind::Unsupported),
            ]
        );
        assert_eq!(schema.flag_names(false).unwrap(), vec!["level"]);
    }

    #[test]
    fn recursive_types_are_cut_at_reentry() {
        let schema = schema::<Linked>();
        assert_eq!(schema.flag_names(false).unwrap(), vec!["value"]);
        assert_eq!(schema.nodes[1].kind, NodeKind::Unsupported);
    }

    #[test]
    fn has_leaves_looks_through_nesting() {
        assert!(schema::<Cfg1>().has_leaves());
        assert!(!Schema::default().has_leaves());
    }
}
