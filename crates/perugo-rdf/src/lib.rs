#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

//! Interest graph of a user over the PerúGo destinations, served as Turtle

mod error;
pub mod graph;
mod projector;
mod record;
mod source;
pub mod turtle;
pub mod vocab;

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

pub use error::{RdfError, Result};
pub use graph::{Graph, Literal, Term, Triple};
pub use projector::{DEFAULT_USER, project};
pub use record::{DestinoRecord, FALLBACK_TOUR_ID, FALLBACK_TOUR_LABEL, TourRecord, Tours};
pub use source::{DestinoSource, MySqlDestinoSource};

/// Shared state of the RDF routes
pub struct RdfState {
    source: Box<dyn DestinoSource>,
    recent_limit: u32,
}

impl RdfState {
    pub fn new(source: Box<dyn DestinoSource>, recent_limit: u32) -> Self {
        Self { source, recent_limit }
    }

    /// Graph over the most recent destinations
    pub async fn recent_graph(&self, user_name: &str) -> Result<Graph> {
        let destinations = self.source.recent(self.recent_limit).await?;
        Ok(project(user_name, &destinations))
    }

    /// Graph over a single destination, only the user node when it does not exist
    pub async fn destino_graph(&self, slug: &str, user_name: &str) -> Result<Graph> {
        let destination = self.source.by_slug(slug).await?;

        if destination.is_none() {
            tracing::warn!(slug, "no destination with this slug");
        }

        Ok(project(user_name, destination.iter()))
    }
}

/// Build the RDF state from configuration, `None` without a `[database]` section
///
/// # Errors
///
/// Returns an error if the database URL is invalid
pub fn build_state(config: &perugo_config::Config) -> anyhow::Result<Option<Arc<RdfState>>> {
    let Some(database) = &config.database else {
        tracing::debug!("No database configured, RDF routes disabled");
        return Ok(None);
    };

    let source = MySqlDestinoSource::connect_lazy(database)
        .map_err(|e| anyhow::anyhow!("Failed to initialize destination store: {e}"))?;

    Ok(Some(Arc::new(RdfState::new(Box::new(source), database.recent_limit))))
}

/// Create the endpoint router for the graph routes
pub fn endpoint_router() -> Router<Arc<RdfState>> {
    Router::new()
        .route("/rdf", get(recent))
        .route("/rdf/destino/{slug}", get(destino))
}

#[derive(Debug, Deserialize)]
struct UserQuery {
    usuario: Option<String>,
}

impl UserQuery {
    fn user_name(&self) -> &str {
        self.usuario.as_deref().filter(|u| !u.is_empty()).unwrap_or(DEFAULT_USER)
    }
}

async fn recent(State(state): State<Arc<RdfState>>, Query(query): Query<UserQuery>) -> Result<impl IntoResponse> {
    let graph = state.recent_graph(query.user_name()).await?;
    Ok(turtle_response(&graph))
}

async fn destino(
    State(state): State<Arc<RdfState>>,
    Path(slug): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse> {
    let graph = state.destino_graph(&slug, query.user_name()).await?;
    Ok(turtle_response(&graph))
}

fn turtle_response(graph: &Graph) -> ([(http::HeaderName, &'static str); 1], String) {
    tracing::debug!(triples = graph.len(), "serializing graph");
    (
        [(http::header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        turtle::serialize(graph),
    )
}
