use std::borrow::Cow;

use serde::Deserialize;
use serde_json::Value;

use crate::graph::Literal;

/// Destination row as read from the `Destino` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DestinoRecord {
    pub slug: Option<String>,
    pub nombre: Option<String>,
    pub ubicacion: Option<String>,
    pub tipo: Option<String>,
    /// Number for DECIMAL and INT columns, text otherwise
    pub precio: Option<Value>,
    pub duracion: Option<Value>,
    pub descripcion: Option<String>,
    pub tours: Option<Tours>,
}

impl DestinoRecord {
    /// Optional descriptive columns as literals, paired with their `ex:` term name
    pub(crate) fn fields(&self) -> [(&'static str, Option<Literal>); 5] {
        [
            ("ubicacion", self.ubicacion.as_deref().map(Literal::string)),
            ("tipo", self.tipo.as_deref().map(Literal::string)),
            ("precio", self.precio.as_ref().and_then(Literal::from_json)),
            ("duracion", self.duracion.as_ref().and_then(Literal::from_json)),
            ("descripcion", self.descripcion.as_deref().map(Literal::string)),
        ]
    }
}

/// Tours column: JSON text as stored, an already decoded list, or any other
/// JSON value that only fails once it is normalized
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Tours {
    Raw(String),
    Parsed(Vec<TourRecord>),
    Other(Value),
}

impl Tours {
    /// Decode the column into tour records
    pub fn normalize(&self) -> Result<Cow<'_, [TourRecord]>, serde_json::Error> {
        match self {
            Self::Raw(text) if text.trim().is_empty() => Ok(Cow::Borrowed(&[])),
            Self::Raw(text) => serde_json::from_str::<Vec<TourRecord>>(text).map(Cow::Owned),
            Self::Parsed(tours) => Ok(Cow::Borrowed(tours)),
            Self::Other(value) => Vec::<TourRecord>::deserialize(value).map(Cow::Owned),
        }
    }
}

/// Tour entry embedded in a destination
///
/// Values are kept as JSON since the column is loosely typed: ids are
/// numbers or strings and prices are numbers or text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TourRecord {
    pub id: Option<Value>,
    pub nombre: Option<Value>,
    pub precio: Option<Value>,
    pub operador: Option<Value>,
}

/// Fallback identifier for a tour with neither id nor name
pub const FALLBACK_TOUR_ID: &str = "tour";

/// Fallback label for a tour without a name
pub const FALLBACK_TOUR_LABEL: &str = "Tour sin nombre";

impl TourRecord {
    /// Stable identifier: a truthy `id`, else `nombre`, else `"tour"`
    pub fn identifier(&self) -> Cow<'_, str> {
        self.id
            .as_ref()
            .filter(|id| is_truthy(id))
            .or(self.nombre.as_ref().filter(|n| !n.is_null()))
            .map_or(Cow::Borrowed(FALLBACK_TOUR_ID), scalar_text)
    }
}

/// Text of a JSON scalar without quotes
pub(crate) fn scalar_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > f64::EPSILON),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
