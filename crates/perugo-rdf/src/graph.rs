use std::collections::BTreeSet;

use crate::vocab;

/// Literal value with an optional datatype IRI
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    pub lexical: String,
    pub datatype: Option<&'static str>,
}

impl Literal {
    /// Plain string literal
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            lexical: value.into(),
            datatype: None,
        }
    }

    /// Literal for a JSON scalar, `None` for `null`
    ///
    /// Integers map to `xsd:integer`, other numbers to `xsd:decimal`, booleans
    /// to `xsd:boolean`. Arrays and objects keep their JSON text.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        let literal = match value {
            Value::Null => return None,
            Value::String(s) => Self::string(s.clone()),
            Value::Bool(b) => Self {
                lexical: b.to_string(),
                datatype: Some(vocab::XSD_BOOLEAN),
            },
            Value::Number(n) if n.is_i64() || n.is_u64() => Self {
                lexical: n.to_string(),
                datatype: Some(vocab::XSD_INTEGER),
            },
            Value::Number(n) => Self {
                lexical: n.to_string(),
                datatype: Some(vocab::XSD_DECIMAL),
            },
            other => Self::string(other.to_string()),
        };

        Some(literal)
    }
}

/// Object position of a triple
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Iri(String),
    Literal(Literal),
}

/// A single `(subject, predicate, object)` statement
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

/// Set of triples, ordered by subject then predicate then object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    triples: BTreeSet<Triple>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple with an IRI object
    pub fn link(&mut self, subject: &str, predicate: &str, object: &str) {
        self.insert(subject, predicate, Term::Iri(object.to_owned()));
    }

    /// Insert a triple with a literal object
    pub fn literal(&mut self, subject: &str, predicate: &str, object: Literal) {
        self.insert(subject, predicate, Term::Literal(object));
    }

    fn insert(&mut self, subject: &str, predicate: &str, object: Term) {
        self.triples.insert(Triple {
            subject: subject.to_owned(),
            predicate: predicate.to_owned(),
            object,
        });
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Whether the graph holds exactly this statement
    pub fn contains(&self, subject: &str, predicate: &str, object: &Term) -> bool {
        self.triples.contains(&Triple {
            subject: subject.to_owned(),
            predicate: predicate.to_owned(),
            object: object.clone(),
        })
    }

    /// All triples about `subject`
    pub fn about<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a Triple> {
        self.triples.iter().filter(move |t| t.subject == subject)
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::collections::btree_set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
