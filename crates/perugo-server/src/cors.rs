use std::{fmt::Display, str::FromStr};

use http::{HeaderName, HeaderValue, Method};
use perugo_config::{AnyOrArray, CorsConfig};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build a Tower CORS layer from configuration
///
/// Entries that do not parse are dropped with a warning.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = match &config.origins {
        AnyOrArray::Any => AllowOrigin::any(),
        AnyOrArray::List(origins) => AllowOrigin::list(parse_all::<HeaderValue>("origin", origins)),
    };

    let methods = match &config.methods {
        AnyOrArray::Any => AllowMethods::any(),
        AnyOrArray::List(methods) => AllowMethods::list(parse_all::<Method>("method", methods)),
    };

    let headers = match &config.headers {
        AnyOrArray::Any => AllowHeaders::any(),
        AnyOrArray::List(headers) => AllowHeaders::list(parse_all::<HeaderName>("header", headers)),
    };

    let layer = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers);

    match config.max_age_duration() {
        Some(max_age) => layer.max_age(max_age),
        None => layer,
    }
}

fn parse_all<T>(kind: &str, values: &[String]) -> Vec<T>
where
    T: FromStr,
    T::Err: Display,
{
    values
        .iter()
        .filter_map(|value| {
            value
                .parse()
                .map_err(|e| tracing::warn!("ignoring invalid CORS {kind} '{value}': {e}"))
                .ok()
        })
        .collect()
}
