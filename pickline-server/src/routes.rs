use axum::{
    Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use pickline::prelude::{Document, Filter};
use serde::Serialize;
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, warn};

use crate::{
    error::{ApiError, GatewayError},
    extract::{Params, Payload},
    fallback,
    filter::{BlogParams, PredictionParams, TestimonialParams},
    gateway::{Gateway, HealthReport},
    schema::{Blog, Contact, Legal, Plan, Prediction, Subscription, Testimonial},
    shape::{Items, shape_document, shape_documents},
};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub gateway: Gateway,
}

/// Acknowledges a successful create.
#[derive(Debug, Clone, Serialize)]
pub struct Ack {
    pub ok: bool,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/test", get(health))
        .route("/predictions", get(list_predictions))
        .route("/predictions/{match_id}", get(get_prediction))
        .route("/blogs", get(list_blogs))
        .route("/blogs/{slug}", get(get_blog))
        .route("/plans", get(list_plans))
        .route("/legal/{slug}", get(get_legal))
        .route("/subscribe", post(subscribe))
        .route("/contact", post(contact))
        .route("/admin/testimonials", get(admin_testimonials))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `GET /`
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Sports Analytics API running" }))
}

/// `GET /test`: storage health probe.
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.gateway.health().await)
}

async fn list<D: Document>(
    gateway: &Gateway,
    filter: Filter,
    limit: Option<usize>,
) -> Result<Json<Items<Value>>, ApiError> {
    let documents = gateway.query(D::collection_name(), filter, limit).await?;
    Ok(Json(shape_documents(documents)?))
}

async fn get_one<D: Document>(gateway: &Gateway, field: &str, key: String) -> Result<Json<Value>, ApiError> {
    let document = gateway
        .find_one(D::collection_name(), Filter::all().eq(field, key))
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(shape_document(document)?))
}

/// `GET /predictions`
pub async fn list_predictions(
    State(state): State<AppState>,
    Params(params): Params<PredictionParams>,
) -> Result<Json<Items<Value>>, ApiError> {
    list::<Prediction>(&state.gateway, params.to_filter(), Some(params.limit)).await
}

/// `GET /predictions/{match_id}`
pub async fn get_prediction(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    get_one::<Prediction>(&state.gateway, "match_id", match_id).await
}

/// `GET /blogs`
pub async fn list_blogs(
    State(state): State<AppState>,
    Params(params): Params<BlogParams>,
) -> Result<Json<Items<Value>>, ApiError> {
    list::<Blog>(&state.gateway, Filter::all(), Some(params.limit)).await
}

/// `GET /blogs/{slug}`
pub async fn get_blog(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, ApiError> {
    get_one::<Blog>(&state.gateway, "slug", slug).await
}

/// Logs why built-in content is served instead of stored content.
fn note_fallback(err: &GatewayError, content: &str) {
    match err {
        GatewayError::Unavailable => debug!(content, "serving fallback"),
        err => warn!(error = %err, content, "store read failed, serving fallback"),
    }
}

/// `GET /plans`. Falls back to the built-in plans while the store is down or
/// failing.
pub async fn list_plans(State(state): State<AppState>) -> Result<Response, ApiError> {
    match state.gateway.query(Plan::collection_name(), Filter::all(), None).await {
        Ok(documents) => Ok(Json(shape_documents(documents)?).into_response()),
        Err(err @ (GatewayError::Unavailable | GatewayError::Read { .. })) => {
            note_fallback(&err, "plans");
            Ok(Json(Items::from(fallback::plans())).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// `GET /legal/{slug}`. Falls back to the built-in pages while the store is down
/// or failing.
pub async fn get_legal(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    let filter = Filter::all().eq("slug", slug.as_str());

    match state.gateway.find_one(Legal::collection_name(), filter).await {
        Ok(Some(document)) => Ok(Json(shape_document(document)?).into_response()),
        Ok(None) => Err(ApiError::NotFound),
        Err(err @ (GatewayError::Unavailable | GatewayError::Read { .. })) => {
            note_fallback(&err, "legal");
            let page = fallback::legal_page(&slug).ok_or(ApiError::NotFound)?;
            Ok(Json(page).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// `POST /subscribe`
pub async fn subscribe(
    State(state): State<AppState>,
    Payload(subscription): Payload<Subscription>,
) -> Result<Json<Ack>, ApiError> {
    state.gateway.create(&subscription).await?;
    info!("new subscription");
    Ok(Json(Ack { ok: true }))
}

/// `POST /contact`
pub async fn contact(
    State(state): State<AppState>,
    Payload(message): Payload<Contact>,
) -> Result<Json<Ack>, ApiError> {
    state.gateway.create(&message).await?;
    info!(topic = message.topic.as_deref().unwrap_or_default(), "new contact message");
    Ok(Json(Ack { ok: true }))
}

/// `GET /admin/testimonials`
pub async fn admin_testimonials(
    State(state): State<AppState>,
    Params(params): Params<TestimonialParams>,
) -> Result<Json<Items<Value>>, ApiError> {
    list::<Testimonial>(&state.gateway, Filter::all(), Some(params.limit)).await
}
