// this module is transparently re-exported by its parent `term`

use std::fmt;

/// An IRI, identifying a node by a global name.
///
/// Equality is exact string equality: no normalization of case, escapes or
/// dot segments is performed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri(Box<str>);

impl Iri {
    /// Builds an IRI, checking that `iri` conforms to [RFC 3987].
    ///
    /// Relative IRI references are accepted.
    ///
    /// [RFC 3987]: https://tools.ietf.org/html/rfc3987
    pub fn new<T: Into<Box<str>>>(iri: T) -> Result<Self, InvalidIri> {
        let iri = iri.into();
        oxiri::IriRef::parse(&iri[..]).map_err(|err| InvalidIri(err.to_string()))?;
        Ok(Iri(iri))
    }

    /// Builds an IRI without checking that it conforms to [RFC 3987].
    ///
    /// [RFC 3987]: https://tools.ietf.org/html/rfc3987
    pub fn new_unchecked<T: Into<Box<str>>>(iri: T) -> Self {
        Iri(iri.into())
    }

    /// The textual value of this IRI.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

/// Error raised by [`Iri::new`] when the given string is not a valid IRI.
#[derive(Clone, Debug, thiserror::Error)]
#[error("the given IRI is invalid: {0}")]
pub struct InvalidIri(pub String);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn valid_iris() {
        for value in [
            "http://example.org/a",
            "urn:isbn:0451450523",
            "mailto:alice@work.example",
            "../relative",
        ] {
            assert!(Iri::new(value).is_ok(), "{value} should parse");
        }
    }

    #[test]
    fn invalid_iris() {
        for value in ["http://[invalid", "a b c"] {
            assert!(Iri::new(value).is_err(), "{value} should not parse");
        }
    }
}
