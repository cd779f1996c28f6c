//! HTTP routes and handlers

use crate::app_state::{AppState, SharedAppState};
use crate::cli::CommandLineArgs;
use crate::error::StatsError;
use crate::metrics;
use crate::models;
use crate::query;
use crate::validated_query::ValidatedQuery;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tower::Layer;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{event, Level};

/// Endpoints listed by the service index, with their descriptions.
const ENDPOINTS: [(&str, &str); 5] = [
    ("/health", "Health check"),
    ("/api/districts", "Get all districts"),
    ("/api/district/:name", "Get specific district data"),
    ("/api/stats", "Get overall statistics"),
    ("/api/top-districts", "Get top districts by employment or 100 day completion"),
];

/// Service type returned by [service]
pub type Service = NormalizePath<Router>;

/// Returns a [Service] serving the dataset named by the command line arguments.
pub fn service(args: &CommandLineArgs) -> Service {
    let state = Arc::new(AppState::new(args));
    let router = router(state);

    // Strip trailing slashes so that `/api/stats/` matches `/api/stats`.
    let normalize_path_layer = NormalizePathLayer::trim_trailing_slash();
    normalize_path_layer.layer(router)
}

/// Returns a [Router] for the given state.
pub fn router(state: SharedAppState) -> Router {
    let cors = cors_layer(&state.args);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/metrics", get(metrics::metrics_handler))
        .route("/api/districts", get(list_districts))
        .route("/api/district/:name", get(get_district))
        .route("/api/stats", get(overall_statistics))
        .route("/api/top-districts", get(top_districts))
        .fallback(endpoint_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .on_request(metrics::request_counter)
                        .on_response(metrics::record_response_metrics),
                )
                .layer(cors)
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("SAMEORIGIN"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::REFERRER_POLICY,
                    HeaderValue::from_static("no-referrer"),
                )),
        )
        .with_state(state)
}

/// Returns a CORS layer allowing GET requests with credentials from the configured origins.
fn cors_layer(args: &CommandLineArgs) -> CorsLayer {
    let origins: Vec<HeaderValue> = args
        .cors_origins()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                event!(Level::WARN, "Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_credentials(true)
}

/// Returns the current time formatted as RFC 3339.
fn timestamp() -> Result<String, StatsError> {
    Ok(OffsetDateTime::now_utc().format(&Rfc3339)?)
}

async fn index() -> Result<Json<models::ServiceIndex>, StatsError> {
    let endpoints: Map<String, Value> = ENDPOINTS
        .iter()
        .map(|(path, description)| (path.to_string(), Value::from(*description)))
        .collect();
    Ok(Json(models::ServiceIndex {
        message: "MGNREGA Uttar Pradesh API is running!".to_string(),
        timestamp: timestamp()?,
        endpoints,
    }))
}

async fn health(
    State(state): State<SharedAppState>,
) -> Result<Json<models::Health>, StatsError> {
    Ok(Json(models::Health {
        status: "OK".to_string(),
        timestamp: timestamp()?,
        environment: state.args.environment.clone(),
        districts: state.dataset.len(),
        dataset_fallback: state.dataset.is_fallback(),
    }))
}

async fn list_districts(
    State(state): State<SharedAppState>,
) -> Json<Vec<models::DistrictSummary>> {
    Json(query::list_districts(&state.dataset))
}

async fn get_district(
    State(state): State<SharedAppState>,
    Path(name): Path<String>,
) -> Result<Json<models::RegionRecord>, StatsError> {
    let result = query::get_district(&state.dataset, &name);
    metrics::record_district_lookup(result.is_ok());
    result.map(|record| Json(record.clone()))
}

async fn overall_statistics(State(state): State<SharedAppState>) -> Json<models::StateSummary> {
    Json(query::overall_statistics(&state.dataset))
}

async fn top_districts(
    State(state): State<SharedAppState>,
    ValidatedQuery(params): ValidatedQuery<models::TopDistrictsQuery>,
) -> Json<Vec<models::RegionRecord>> {
    let top = query::top_districts(&state.dataset, params.by, params.n);
    Json(top.into_iter().cloned().collect())
}

async fn endpoint_not_found() -> StatsError {
    StatsError::EndpointNotFound
}
