//! The three kinds of resource that can appear in a triple.
//!
//! | Kind | Identity | Canonical form |
//! |------|----------|----------------|
//! | [`NamedNode`] | IRI string | `<iri>` |
//! | [`LocalNode`] | the handle itself | `_:label` |
//! | [`Literal`] | lexical form + tag | `"lex"`, `"lex"@lang`, `"lex"^^<dt>` |
//!
//! Named nodes and literals are plain values: two of them are equal when their
//! content is. Local nodes are identities: clones of one handle are the same
//! node, two separately created handles never are, even if they share a label
//! and a hash.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use arcstr::ArcStr;

use super::Position;
use crate::utils::error::{Error, Result};
use crate::utils::hash::{stable_hash, stable_hash_u64};

/// A globally named resource, identified by its IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamedNode(ArcStr);

impl NamedNode {
    /// Creates a named node from an IRI.
    #[must_use]
    pub fn new(iri: impl Into<ArcStr>) -> Self {
        Self(iri.into())
    }

    /// Returns the IRI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl From<&str> for NamedNode {
    fn from(iri: &str) -> Self {
        Self::new(iri)
    }
}

static NEXT_LOCAL_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
struct LocalNodeData {
    hash: u64,
    label: ArcStr,
}

/// A locally scoped node (a blank node in RDF terms).
///
/// Equality is identity: a `LocalNode` equals its clones and nothing else.
/// The reported hash and label are hints only - distinct local nodes may share
/// both, and the store orders them through its collision table when they do.
#[derive(Clone)]
pub struct LocalNode(Arc<LocalNodeData>);

impl LocalNode {
    /// Creates a fresh local node with a process-unique label and hash.
    #[must_use]
    pub fn new() -> Self {
        let id = NEXT_LOCAL_ID.fetch_add(1, Ordering::Relaxed);
        Self(Arc::new(LocalNodeData {
            hash: stable_hash_u64(id),
            label: arcstr::format!("b{id}"),
        }))
    }

    /// Creates a fresh local node with the given label.
    ///
    /// The hash is derived from the label, so two nodes created with the same
    /// label collide on both hash and canonical form while staying distinct.
    #[must_use]
    pub fn labeled(label: impl Into<ArcStr>) -> Self {
        let label = label.into();
        Self(Arc::new(LocalNodeData {
            hash: stable_hash(label.as_bytes()),
            label,
        }))
    }

    /// Creates a fresh local node reporting an explicit hash.
    ///
    /// Mostly useful for wrapping external blank node implementations that
    /// bring their own (possibly degenerate) hash codes.
    #[must_use]
    pub fn with_hash(hash: u64, label: impl Into<ArcStr>) -> Self {
        Self(Arc::new(LocalNodeData {
            hash,
            label: label.into(),
        }))
    }

    /// Returns the label used in the canonical form.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.0.label
    }

    /// Returns the hash this node reports.
    #[must_use]
    pub fn reported_hash(&self) -> u64 {
        self.0.hash
    }

    /// Returns true if both handles refer to the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Creates a weak handle that does not keep the node alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakLocalNode {
        WeakLocalNode(Arc::downgrade(&self.0))
    }
}

impl Default for LocalNode {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for LocalNode {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for LocalNode {}

impl Hash for LocalNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash.hash(state);
    }
}

impl fmt::Debug for LocalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalNode")
            .field("label", &self.0.label)
            .field("hash", &self.0.hash)
            .field("ptr", &Arc::as_ptr(&self.0))
            .finish()
    }
}

impl fmt::Display for LocalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0.label)
    }
}

/// A non-owning handle to a [`LocalNode`].
///
/// Identity checks keep working after the node is dropped: the allocation
/// stays reserved while any weak handle exists, so its address is never
/// handed to another node.
#[derive(Debug, Clone)]
pub struct WeakLocalNode(Weak<LocalNodeData>);

impl WeakLocalNode {
    /// Returns true if this handle points at `node`.
    #[must_use]
    pub fn is(&self, node: &LocalNode) -> bool {
        std::ptr::eq(self.0.as_ptr(), Arc::as_ptr(&node.0))
    }

    /// Returns true if the node is still referenced somewhere.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

/// The optional qualifier of a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralTag {
    /// No language and no datatype.
    Plain,
    /// A language tag such as `en` or `de-AT`.
    Language(ArcStr),
    /// A datatype IRI.
    Datatype(NamedNode),
}

/// A literal value: lexical form plus an optional language tag or datatype.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    lexical: ArcStr,
    tag: LiteralTag,
}

impl Literal {
    /// Creates a plain literal.
    #[must_use]
    pub fn plain(lexical: impl Into<ArcStr>) -> Self {
        Self {
            lexical: lexical.into(),
            tag: LiteralTag::Plain,
        }
    }

    /// Creates a language-tagged literal.
    #[must_use]
    pub fn with_language(lexical: impl Into<ArcStr>, language: impl Into<ArcStr>) -> Self {
        Self {
            lexical: lexical.into(),
            tag: LiteralTag::Language(language.into()),
        }
    }

    /// Creates a typed literal.
    #[must_use]
    pub fn typed(lexical: impl Into<ArcStr>, datatype: NamedNode) -> Self {
        Self {
            lexical: lexical.into(),
            tag: LiteralTag::Datatype(datatype),
        }
    }

    /// Returns the lexical form.
    #[must_use]
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// Returns the language tag or datatype.
    #[must_use]
    pub fn tag(&self) -> &LiteralTag {
        &self.tag
    }

    /// Returns the language tag, if any.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        match &self.tag {
            LiteralTag::Language(lang) => Some(lang),
            _ => None,
        }
    }

    /// Returns the datatype, if any.
    #[must_use]
    pub fn datatype(&self) -> Option<&NamedNode> {
        match &self.tag {
            LiteralTag::Datatype(dt) => Some(dt),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.lexical.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                c => write!(f, "{c}")?,
            }
        }
        f.write_str("\"")?;
        match &self.tag {
            LiteralTag::Plain => Ok(()),
            LiteralTag::Language(lang) => write!(f, "@{lang}"),
            LiteralTag::Datatype(dt) => write!(f, "^^{dt}"),
        }
    }
}

/// Any value that can appear in a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    /// A globally named node.
    Named(NamedNode),
    /// A locally scoped identity node.
    Local(LocalNode),
    /// A literal value (object position only).
    Literal(Literal),
}

impl Resource {
    /// Shorthand for a named node resource.
    #[must_use]
    pub fn iri(iri: impl Into<ArcStr>) -> Self {
        Self::Named(NamedNode::new(iri))
    }

    /// Shorthand for a plain literal resource.
    #[must_use]
    pub fn literal(lexical: impl Into<ArcStr>) -> Self {
        Self::Literal(Literal::plain(lexical))
    }

    /// Returns true for literals.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Returns the canonical string form.
    ///
    /// For named nodes and literals equal forms imply equal resources. Local
    /// nodes only render their label, which may be shared.
    #[must_use]
    pub fn canonical_form(&self) -> ArcStr {
        match self {
            Self::Named(node) => arcstr::format!("{node}"),
            Self::Local(node) => arcstr::format!("{node}"),
            Self::Literal(lit) => arcstr::format!("{lit}"),
        }
    }

    /// Returns the hash the store orders by first.
    ///
    /// Named nodes and literals hash their canonical form; local nodes report
    /// their own hash.
    #[must_use]
    pub fn ordering_hash(&self, form: &str) -> u64 {
        match self {
            Self::Local(node) => node.reported_hash(),
            Self::Named(_) | Self::Literal(_) => stable_hash(form.as_bytes()),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(node) => write!(f, "{node}"),
            Self::Local(node) => write!(f, "{node}"),
            Self::Literal(lit) => write!(f, "{lit}"),
        }
    }
}

impl From<NamedNode> for Resource {
    fn from(node: NamedNode) -> Self {
        Self::Named(node)
    }
}

impl From<LocalNode> for Resource {
    fn from(node: LocalNode) -> Self {
        Self::Local(node)
    }
}

impl From<Literal> for Resource {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}

/// A non-literal resource: the only kind allowed as subject or predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// A globally named node.
    Named(NamedNode),
    /// A locally scoped identity node.
    Local(LocalNode),
}

impl Node {
    /// Shorthand for a named node.
    #[must_use]
    pub fn iri(iri: impl Into<ArcStr>) -> Self {
        Self::Named(NamedNode::new(iri))
    }

    /// Converts a resource found at `position`, rejecting literals.
    pub fn from_resource(resource: Resource, position: Position) -> Result<Self> {
        match resource {
            Resource::Named(node) => Ok(Self::Named(node)),
            Resource::Local(node) => Ok(Self::Local(node)),
            Resource::Literal(_) => Err(Error::LiteralNotAllowed(position)),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(node) => write!(f, "{node}"),
            Self::Local(node) => write!(f, "{node}"),
        }
    }
}

impl From<NamedNode> for Node {
    fn from(node: NamedNode) -> Self {
        Self::Named(node)
    }
}

impl From<LocalNode> for Node {
    fn from(node: LocalNode) -> Self {
        Self::Local(node)
    }
}

impl From<Node> for Resource {
    fn from(node: Node) -> Self {
        match node {
            Node::Named(node) => Self::Named(node),
            Node::Local(node) => Self::Local(node),
        }
    }
}

impl TryFrom<Resource> for Node {
    type Error = Error;

    fn try_from(resource: Resource) -> Result<Self> {
        Self::from_resource(resource, Position::Subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_node_equality() {
        assert_eq!(NamedNode::new("http://a"), NamedNode::from("http://a"));
        assert_ne!(NamedNode::new("http://a"), NamedNode::new("http://b"));
        assert_eq!(NamedNode::new("http://a").to_string(), "<http://a>");
    }

    #[test]
    fn test_local_node_identity() {
        let a = LocalNode::labeled("x");
        let b = LocalNode::labeled("x");
        assert_eq!(a.reported_hash(), b.reported_hash());
        assert_eq!(a.to_string(), b.to_string());
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_fresh_local_nodes_are_distinct() {
        let a = LocalNode::new();
        let b = LocalNode::new();
        assert_ne!(a, b);
        assert_ne!(a.label(), b.label());
    }

    #[test]
    fn test_weak_local_node() {
        let node = LocalNode::with_hash(7, "n");
        let other = LocalNode::with_hash(7, "n");
        let weak = node.downgrade();
        assert!(weak.is(&node));
        assert!(!weak.is(&other));
        assert!(weak.is_alive());
        drop(node);
        assert!(!weak.is_alive());
        assert!(!weak.is(&other));
    }

    #[test]
    fn test_literal_equality_includes_tag() {
        let plain = Literal::plain("chat");
        let en = Literal::with_language("chat", "en");
        let fr = Literal::with_language("chat", "fr");
        let typed = Literal::typed("chat", NamedNode::new("http://string"));

        assert_ne!(plain, en);
        assert_ne!(en, fr);
        assert_ne!(plain, typed);
        assert_eq!(en, Literal::with_language("chat", "en"));
        assert_eq!(en.language(), Some("en"));
        assert_eq!(typed.datatype(), Some(&NamedNode::new("http://string")));
    }

    #[test]
    fn test_literal_canonical_form_escapes() {
        let lit = Literal::plain("say \"hi\"\\");
        assert_eq!(lit.to_string(), r#""say \"hi\"\\""#);

        // Without escaping these two would render identically.
        let tricky = Literal::plain("a\"@en");
        let tagged = Literal::with_language("a", "en");
        assert_ne!(tricky.to_string(), tagged.to_string());
    }

    #[test]
    fn test_canonical_forms_by_kind() {
        assert_eq!(Resource::iri("http://a").canonical_form(), "<http://a>");
        assert_eq!(
            Resource::from(LocalNode::labeled("b1")).canonical_form(),
            "_:b1"
        );
        assert_eq!(
            Resource::from(Literal::typed("1", NamedNode::new("http://int"))).canonical_form(),
            "\"1\"^^<http://int>"
        );
    }

    #[test]
    fn test_ordering_hash() {
        let named = Resource::iri("http://a");
        let form = named.canonical_form();
        assert_eq!(named.ordering_hash(&form), stable_hash(form.as_bytes()));

        let local = Resource::from(LocalNode::with_hash(u64::MAX, "z"));
        assert_eq!(local.ordering_hash(&local.canonical_form()), u64::MAX);
    }

    #[test]
    fn test_node_rejects_literal() {
        let err = Node::from_resource(Resource::literal("x"), Position::Predicate).unwrap_err();
        assert_eq!(err, Error::LiteralNotAllowed(Position::Predicate));
        assert!(Node::try_from(Resource::iri("http://a")).is_ok());
    }
}
