//! Namespaces and terms used by the PerúGo graph

pub const EX: &str = "https://www.perugo/";
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// Prefix bindings written at the top of every Turtle document
pub const PREFIXES: [(&str, &str); 5] = [("ex", EX), ("foaf", FOAF), ("rdf", RDF), ("rdfs", RDFS), ("xsd", XSD)];

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

pub const FOAF_PERSON: &str = "http://xmlns.com/foaf/0.1/Person";
pub const FOAF_NICK: &str = "http://xmlns.com/foaf/0.1/nick";

pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

pub const EX_DESTINO: &str = "https://www.perugo/Destino";
pub const EX_TOUR: &str = "https://www.perugo/Tour";
pub const EX_MOSTRO_INTERES_EN: &str = "https://www.perugo/mostro_interes_en";
pub const EX_OFRECE: &str = "https://www.perugo/ofrece";
pub const EX_PRICE_USD: &str = "https://www.perugo/priceUSD";
pub const EX_OPERATOR: &str = "https://www.perugo/operator";

/// `ex:` term for a destination column (`ubicacion`, `tipo`, ...)
pub fn ex(local: &str) -> String {
    format!("{EX}{local}")
}

/// Node IRI in the `ex:` namespace: `https://www.perugo/<kind>#<fragment>`
///
/// The fragment is percent-encoded, so decoding it recovers the key.
pub fn node(kind: &str, key: &str) -> String {
    format!("{EX}{kind}#{}", urlencoding::encode(key))
}
