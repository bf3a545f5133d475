use axum::Json;
use serde::Serialize;

pub const HOME_MESSAGE: &str = "Servidor backend operativo.";

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    message: &'static str,
}

/// Liveness banner served at `/`
pub async fn home_handler() -> Json<HomeResponse> {
    Json(HomeResponse { message: HOME_MESSAGE })
}
