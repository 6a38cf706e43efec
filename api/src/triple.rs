//! A triple is a statement: subject, predicate, object.

use crate::term::{Iri, Resource, Term};
use std::fmt;

/// An RDF statement.
///
/// The predicate position always holds an [`Iri`]; the type system makes a
/// blank node or literal predicate unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    subject: Resource,
    predicate: Iri,
    object: Term,
}

impl Triple {
    /// Builds a triple from its three components.
    pub fn new<S, O>(subject: S, predicate: Iri, object: O) -> Self
    where
        S: Into<Resource>,
        O: Into<Term>,
    {
        Triple {
            subject: subject.into(),
            predicate,
            object: object.into(),
        }
    }

    /// The subject of this triple.
    pub fn s(&self) -> &Resource {
        &self.subject
    }

    /// The predicate of this triple.
    pub fn p(&self) -> &Iri {
        &self.predicate
    }

    /// The object of this triple.
    pub fn o(&self) -> &Term {
        &self.object
    }

    /// Decomposes this triple into its three components.
    pub fn into_spo(self) -> (Resource, Iri, Term) {
        (self.subject, self.predicate, self.object)
    }

    /// Whether this triple contains a blank node in any position.
    ///
    /// (The predicate never does.)
    pub fn has_blank(&self) -> bool {
        self.subject.is_blank() || self.object.is_blank()
    }

    /// Whether this triple is matched by the given pattern,
    /// where `None` is a wildcard.
    pub fn matched_by(
        &self,
        s: Option<&Resource>,
        p: Option<&Iri>,
        o: Option<&Term>,
    ) -> bool {
        s.map_or(true, |s| s == &self.subject)
            && p.map_or(true, |p| p == &self.predicate)
            && o.map_or(true, |o| o == &self.object)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::term::{BnodeScope, Literal};

    fn ex(suffix: &str) -> Iri {
        Iri::new_unchecked(format!("http://example.org/{suffix}"))
    }

    #[test]
    fn structural_equality() {
        let t1 = Triple::new(ex("a"), ex("p"), ex("b"));
        let t2 = Triple::new(ex("a"), ex("p"), ex("b"));
        assert_eq!(t1, t2);
    }

    #[test]
    fn matched_by_wildcards() {
        let scope = BnodeScope::new();
        let b = scope.fresh();
        let t = Triple::new(b, ex("p"), Literal::plain("x"));
        assert!(t.matched_by(None, None, None));
        assert!(t.matched_by(Some(&b.into()), None, None));
        assert!(t.matched_by(None, Some(&ex("p")), None));
        assert!(!t.matched_by(None, Some(&ex("q")), None));
        assert!(t.matched_by(None, None, Some(&Literal::plain("x").into())));
        assert!(!t.matched_by(None, None, Some(&Literal::plain("y").into())));
    }
}
