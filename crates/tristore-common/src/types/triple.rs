//! Triples and triple patterns.

use std::fmt;

use super::{Node, Resource};
use crate::utils::error::{Error, Result};

/// A slot of a triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// The subject slot.
    Subject,
    /// The predicate slot.
    Predicate,
    /// The object slot.
    Object,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subject => write!(f, "subject"),
            Self::Predicate => write!(f, "predicate"),
            Self::Object => write!(f, "object"),
        }
    }
}

/// A subject-predicate-object statement.
///
/// Subject and predicate are never literals; the constructors enforce that.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    subject: Resource,
    predicate: Resource,
    object: Resource,
}

impl Triple {
    /// Creates a triple from typed components.
    #[must_use]
    pub fn new(
        subject: impl Into<Node>,
        predicate: impl Into<Node>,
        object: impl Into<Resource>,
    ) -> Self {
        let subject: Node = subject.into();
        let predicate: Node = predicate.into();
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Creates a triple from untyped resources.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LiteralNotAllowed`] if the subject or the predicate is
    /// a literal.
    pub fn try_new(subject: Resource, predicate: Resource, object: Resource) -> Result<Self> {
        if subject.is_literal() {
            return Err(Error::LiteralNotAllowed(Position::Subject));
        }
        if predicate.is_literal() {
            return Err(Error::LiteralNotAllowed(Position::Predicate));
        }
        Ok(Self {
            subject,
            predicate,
            object,
        })
    }

    /// Returns the subject.
    #[must_use]
    pub fn subject(&self) -> &Resource {
        &self.subject
    }

    /// Returns the predicate.
    #[must_use]
    pub fn predicate(&self) -> &Resource {
        &self.predicate
    }

    /// Returns the object.
    #[must_use]
    pub fn object(&self) -> &Resource {
        &self.object
    }

    /// Returns the component at `position`.
    #[must_use]
    pub fn get(&self, position: Position) -> &Resource {
        match position {
            Position::Subject => &self.subject,
            Position::Predicate => &self.predicate,
            Position::Object => &self.object,
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// A triple pattern: each component is either bound or a wildcard (`None`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    /// Bound subject, or `None` for any.
    pub subject: Option<Resource>,
    /// Bound predicate, or `None` for any.
    pub predicate: Option<Resource>,
    /// Bound object, or `None` for any.
    pub object: Option<Resource>,
}

impl TriplePattern {
    /// A pattern matching every triple.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Builds a pattern from optional components.
    #[must_use]
    pub fn new(
        subject: Option<Resource>,
        predicate: Option<Resource>,
        object: Option<Resource>,
    ) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// A pattern binding only the subject.
    #[must_use]
    pub fn with_subject(subject: impl Into<Resource>) -> Self {
        Self {
            subject: Some(subject.into()),
            ..Self::default()
        }
    }

    /// A pattern binding only the predicate.
    #[must_use]
    pub fn with_predicate(predicate: impl Into<Resource>) -> Self {
        Self {
            predicate: Some(predicate.into()),
            ..Self::default()
        }
    }

    /// A pattern binding only the object.
    #[must_use]
    pub fn with_object(object: impl Into<Resource>) -> Self {
        Self {
            object: Some(object.into()),
            ..Self::default()
        }
    }

    /// A pattern binding all three components of `triple`.
    #[must_use]
    pub fn exact(triple: &Triple) -> Self {
        Self {
            subject: Some(triple.subject.clone()),
            predicate: Some(triple.predicate.clone()),
            object: Some(triple.object.clone()),
        }
    }

    /// Returns true if no component is bound.
    #[must_use]
    pub fn is_any(&self) -> bool {
        self.subject.is_none() && self.predicate.is_none() && self.object.is_none()
    }

    /// Checks a triple against the pattern component by component.
    ///
    /// This is the brute-force definition of a match; indexed lookups must
    /// agree with it.
    #[must_use]
    pub fn matches(&self, triple: &Triple) -> bool {
        fn slot(bound: Option<&Resource>, value: &Resource) -> bool {
            bound.is_none_or(|b| b == value)
        }
        slot(self.subject.as_ref(), &triple.subject)
            && slot(self.predicate.as_ref(), &triple.predicate)
            && slot(self.object.as_ref(), &triple.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Literal, LocalNode, NamedNode};

    fn iri(s: &str) -> NamedNode {
        NamedNode::new(s)
    }

    #[test]
    fn test_triple_accessors() {
        let t = Triple::new(iri("s"), iri("p"), Literal::plain("o"));
        assert_eq!(t.subject(), &Resource::iri("s"));
        assert_eq!(t.get(Position::Predicate), &Resource::iri("p"));
        assert_eq!(t.object(), &Resource::literal("o"));
        assert_eq!(t.to_string(), "<s> <p> \"o\" .");
    }

    #[test]
    fn test_try_new_rejects_literals() {
        let err = Triple::try_new(Resource::literal("x"), Resource::iri("p"), Resource::iri("o"))
            .unwrap_err();
        assert_eq!(err, Error::LiteralNotAllowed(Position::Subject));

        let err = Triple::try_new(Resource::iri("s"), Resource::literal("x"), Resource::iri("o"))
            .unwrap_err();
        assert_eq!(err, Error::LiteralNotAllowed(Position::Predicate));

        assert!(
            Triple::try_new(Resource::iri("s"), Resource::iri("p"), Resource::literal("o")).is_ok()
        );
    }

    #[test]
    fn test_triple_equality_with_local_nodes() {
        let b = LocalNode::labeled("b");
        let twin = LocalNode::labeled("b");
        let t1 = Triple::new(b.clone(), iri("p"), iri("o"));
        let t2 = Triple::new(b, iri("p"), iri("o"));
        let t3 = Triple::new(twin, iri("p"), iri("o"));
        assert_eq!(t1, t2);
        assert_ne!(t1, t3);
    }

    #[test]
    fn test_pattern_matches() {
        let t = Triple::new(iri("alice"), iri("knows"), iri("bob"));

        assert!(TriplePattern::any().matches(&t));
        assert!(TriplePattern::with_subject(iri("alice")).matches(&t));
        assert!(!TriplePattern::with_subject(iri("bob")).matches(&t));
        assert!(TriplePattern::with_object(iri("bob")).matches(&t));
        assert!(TriplePattern::exact(&t).matches(&t));

        let pattern = TriplePattern::new(
            None,
            Some(Resource::iri("knows")),
            Some(Resource::iri("carol")),
        );
        assert!(!pattern.matches(&t));
    }

    #[test]
    fn test_pattern_is_any() {
        assert!(TriplePattern::any().is_any());
        assert!(!TriplePattern::with_predicate(iri("p")).is_any());
    }
}
