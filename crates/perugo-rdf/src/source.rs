use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::Value;
use sqlx::{MySqlPool, mysql::MySqlPoolOptions};

use crate::{
    error::{RdfError, Result},
    record::{DestinoRecord, Tours},
};

/// Read access to destination records
#[async_trait]
pub trait DestinoSource: Send + Sync {
    /// Most recently created destinations, newest first
    async fn recent(&self, limit: u32) -> Result<Vec<DestinoRecord>>;

    /// Single destination by slug
    async fn by_slug(&self, slug: &str) -> Result<Option<DestinoRecord>>;
}

// Text columns are cast to CHAR. `precio` and `duracion` go through
// JSON_OBJECT so numeric column types survive as JSON numbers.
const SELECT_DESTINO: &str = "SELECT \
    CAST(slug AS CHAR) AS slug, \
    CAST(nombre AS CHAR) AS nombre, \
    CAST(ubicacion AS CHAR) AS ubicacion, \
    CAST(tipo AS CHAR) AS tipo, \
    CAST(JSON_OBJECT('precio', precio, 'duracion', duracion) AS CHAR) AS measures, \
    CAST(descripcion AS CHAR) AS descripcion, \
    CAST(tours AS CHAR) AS tours \
    FROM Destino";

/// `Destino` table in MySQL
pub struct MySqlDestinoSource {
    pool: MySqlPool,
}

impl MySqlDestinoSource {
    /// Create a source whose pool connects on first use
    ///
    /// The service starts even when the database is down; queries then fail
    /// with [`RdfError::Unavailable`].
    pub fn connect_lazy(config: &perugo_config::DatabaseConfig) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy(config.url.expose_secret())
            .map_err(|e| RdfError::ConfigError(format!("invalid database url: {e}")))?;

        Ok(Self { pool })
    }

    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DestinoSource for MySqlDestinoSource {
    #[tracing::instrument(skip(self))]
    async fn recent(&self, limit: u32) -> Result<Vec<DestinoRecord>> {
        let rows: Vec<DestinoRow> = sqlx::query_as(&format!("{SELECT_DESTINO} ORDER BY creadoEn DESC LIMIT ?"))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(count = rows.len(), "loaded recent destinations");

        Ok(rows.into_iter().map(DestinoRecord::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn by_slug(&self, slug: &str) -> Result<Option<DestinoRecord>> {
        let row: Option<DestinoRow> = sqlx::query_as(&format!("{SELECT_DESTINO} WHERE slug = ? LIMIT 1"))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(DestinoRecord::from))
    }
}

#[derive(sqlx::FromRow)]
struct DestinoRow {
    slug: Option<String>,
    nombre: Option<String>,
    ubicacion: Option<String>,
    tipo: Option<String>,
    measures: Option<String>,
    descripcion: Option<String>,
    tours: Option<String>,
}

/// `precio` and `duracion` as typed by MySQL
#[derive(Debug, Default, Deserialize)]
struct Measures {
    #[serde(default)]
    precio: Option<Value>,
    #[serde(default)]
    duracion: Option<Value>,
}

impl Measures {
    fn parse(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_else(|e| {
            tracing::warn!("unreadable precio/duracion columns, skipping them: {e}");
            Self::default()
        })
    }
}

impl From<DestinoRow> for DestinoRecord {
    fn from(row: DestinoRow) -> Self {
        let measures = row.measures.as_deref().map(Measures::parse).unwrap_or_default();

        Self {
            slug: row.slug,
            nombre: row.nombre,
            ubicacion: row.ubicacion,
            tipo: row.tipo,
            precio: measures.precio,
            duracion: measures.duracion,
            descripcion: row.descripcion,
            tours: row.tours.map(Tours::Raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{graph::Literal, vocab};

    fn row(measures: Option<&str>) -> DestinoRow {
        DestinoRow {
            slug: Some("cusco".to_owned()),
            nombre: Some("Cusco".to_owned()),
            ubicacion: None,
            tipo: None,
            measures: measures.map(str::to_owned),
            descripcion: None,
            tours: Some("[]".to_owned()),
        }
    }

    #[test]
    fn numeric_columns_keep_their_type() {
        let record = DestinoRecord::from(row(Some(r#"{"precio": 30.50, "duracion": 3}"#)));

        assert_eq!(record.precio, Some(json!(30.5)));
        assert_eq!(record.duracion, Some(json!(3)));

        let price = record.precio.as_ref().and_then(Literal::from_json).unwrap();
        assert_eq!(price.datatype, Some(vocab::XSD_DECIMAL));
    }

    #[test]
    fn text_and_null_columns() {
        let record = DestinoRecord::from(row(Some(r#"{"precio": null, "duracion": "3 días"}"#)));

        assert_eq!(record.precio, None);
        assert_eq!(record.duracion, Some(json!("3 días")));
        assert!(matches!(record.tours, Some(Tours::Raw(_))));
    }

    #[test]
    fn unreadable_measures_are_skipped() {
        let record = DestinoRecord::from(row(Some("not json")));
        assert_eq!(record.precio, None);
        assert_eq!(record.duracion, None);

        let record = DestinoRecord::from(row(None));
        assert_eq!(record.nombre.as_deref(), Some("Cusco"));
        assert_eq!(record.precio, None);
    }
}
