//! Standard and custom namespaces.
//!
//! This module provides:
//! * the [`Namespace`] type for defining custom namespaces;
//! * modules holding the terms of the common namespaces this core needs
//!   (notably [`owl::sameAs`]).
//!
//! # Example use
//! ```
//! use tessera_api::ns::{owl, rdfs, Namespace};
//!
//! let schema = Namespace::new("http://schema.org/").unwrap();
//! let s_name = schema.get("name").unwrap();
//! assert_eq!(s_name.as_str(), "http://schema.org/name");
//! assert_eq!(owl::sameAs.as_str(), "http://www.w3.org/2002/07/owl#sameAs");
//! assert_eq!(rdfs::range.as_str(), "http://www.w3.org/2000/01/rdf-schema#range");
//! ```
#![allow(non_upper_case_globals)]

use crate::term::{InvalidIri, Iri};

/// A custom namespace, from which terms can be derived by suffix.
#[derive(Clone, Debug)]
pub struct Namespace(Box<str>);

impl Namespace {
    /// Builds a namespace, checking that `base` is a valid IRI.
    pub fn new<T: Into<Box<str>>>(base: T) -> Result<Self, InvalidIri> {
        let base = base.into();
        Iri::new(&base[..])?;
        Ok(Namespace(base))
    }

    /// Builds the term `{base}{suffix}`, checking that it is a valid IRI.
    pub fn get(&self, suffix: &str) -> Result<Iri, InvalidIri> {
        Iri::new(format!("{}{}", self.0, suffix))
    }

    /// The base IRI of this namespace.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The `rdf:` namespace terms used by this core.
pub mod rdf {
    use super::*;
    lazy_static::lazy_static! {
        /// `rdf:type`
        pub static ref type_: Iri =
            Iri::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
        /// `rdf:Property`
        pub static ref Property: Iri =
            Iri::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#Property");
    }
}

/// The `rdfs:` namespace terms used by this core.
pub mod rdfs {
    use super::*;
    lazy_static::lazy_static! {
        /// `rdfs:domain`
        pub static ref domain: Iri =
            Iri::new_unchecked("http://www.w3.org/2000/01/rdf-schema#domain");
        /// `rdfs:range`
        pub static ref range: Iri =
            Iri::new_unchecked("http://www.w3.org/2000/01/rdf-schema#range");
        /// `rdfs:subClassOf`
        pub static ref subClassOf: Iri =
            Iri::new_unchecked("http://www.w3.org/2000/01/rdf-schema#subClassOf");
        /// `rdfs:subPropertyOf`
        pub static ref subPropertyOf: Iri =
            Iri::new_unchecked("http://www.w3.org/2000/01/rdf-schema#subPropertyOf");
        /// `rdfs:label`
        pub static ref label: Iri =
            Iri::new_unchecked("http://www.w3.org/2000/01/rdf-schema#label");
        /// `rdfs:comment`
        pub static ref comment: Iri =
            Iri::new_unchecked("http://www.w3.org/2000/01/rdf-schema#comment");
    }
}

/// The `owl:` namespace terms used by this core.
pub mod owl {
    use super::*;
    lazy_static::lazy_static! {
        /// `owl:sameAs`, asserting that two resources denote the same thing.
        pub static ref sameAs: Iri =
            Iri::new_unchecked("http://www.w3.org/2002/07/owl#sameAs");
        /// `owl:Thing`
        pub static ref Thing: Iri =
            Iri::new_unchecked("http://www.w3.org/2002/07/owl#Thing");
    }
}

/// The `xsd:` namespace terms used by this core.
pub mod xsd {
    use super::*;
    lazy_static::lazy_static! {
        /// `xsd:string`
        pub static ref string: Iri =
            Iri::new_unchecked("http://www.w3.org/2001/XMLSchema#string");
        /// `xsd:integer`
        pub static ref integer: Iri =
            Iri::new_unchecked("http://www.w3.org/2001/XMLSchema#integer");
        /// `xsd:boolean`
        pub static ref boolean: Iri =
            Iri::new_unchecked("http://www.w3.org/2001/XMLSchema#boolean");
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn custom_namespace() {
        let ex = Namespace::new("http://example.org/ns/").unwrap();
        assert_eq!(
            ex.get("a").unwrap(),
            Iri::new_unchecked("http://example.org/ns/a")
        );
    }

    #[test]
    fn invalid_suffix_rejected() {
        let ex = Namespace::new("http://example.org/ns/").unwrap();
        assert!(ex.get("a b").is_err());
    }
}
