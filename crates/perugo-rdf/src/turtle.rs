use std::fmt::Write as _;

use crate::{
    graph::{Graph, Literal, Term},
    vocab,
};

/// Serialize a graph as Turtle
///
/// Statements are grouped by subject, `rdf:type` is written as `a`, and IRIs
/// under a bound namespace are compacted when the local part is a plain name.
/// Output order follows the graph's ordering, so equal graphs serialize to
/// equal text.
pub fn serialize(graph: &Graph) -> String {
    let mut out = String::new();

    for (prefix, namespace) in vocab::PREFIXES {
        let _ = writeln!(out, "@prefix {prefix}: <{namespace}> .");
    }

    let mut current_subject: Option<&str> = None;

    for triple in graph {
        if current_subject == Some(triple.subject.as_str()) {
            out.push_str(" ;\n    ");
        } else {
            if current_subject.is_some() {
                out.push_str(" .\n");
            }
            out.push('\n');
            out.push_str(&iri(&triple.subject));
            out.push(' ');
            current_subject = Some(&triple.subject);
        }

        out.push_str(&predicate(&triple.predicate));
        out.push(' ');
        out.push_str(&object(&triple.object));
    }

    if current_subject.is_some() {
        out.push_str(" .\n");
    }

    out
}

fn predicate(value: &str) -> String {
    if value == vocab::RDF_TYPE {
        "a".to_owned()
    } else {
        iri(value)
    }
}

fn object(term: &Term) -> String {
    match term {
        Term::Iri(value) => iri(value),
        Term::Literal(literal) => literal_text(literal),
    }
}

/// Prefixed name when possible, `<...>` otherwise
fn iri(value: &str) -> String {
    for (prefix, namespace) in vocab::PREFIXES {
        if let Some(local) = value.strip_prefix(namespace)
            && is_plain_local_name(local)
        {
            return format!("{prefix}:{local}");
        }
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('<');
    for c in value.chars() {
        match c {
            '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' | '\u{0}'..='\u{20}' => {
                let _ = write!(out, "\\u{:04X}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('>');
    out
}

fn is_plain_local_name(local: &str) -> bool {
    let mut chars = local.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn literal_text(literal: &Literal) -> String {
    let mut out = String::with_capacity(literal.lexical.len() + 2);
    out.push('"');
    for c in literal.lexical.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');

    if let Some(datatype) = literal.datatype {
        out.push_str("^^");
        out.push_str(&iri(datatype));
    }

    out
}
