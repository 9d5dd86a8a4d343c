use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    AfterglowError, VERSION,
    error::ErrorCode,
    models::Coordinate,
    sky::{EventSource, Prediction, SkyForecastService},
    weather::ForecastProvider,
};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ForecastProvider>,
    pub event_source: EventSource,
}

impl AppState {
    pub fn new(provider: Arc<dyn ForecastProvider>, event_source: EventSource) -> Self {
        Self {
            provider,
            event_source,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictionQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PredictionQuery {
    fn coordinate(&self) -> crate::Result<Coordinate> {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(AfterglowError::validation(
                "latitude and longitude query parameters are required",
            ));
        };
        let coordinate = Coordinate::new(latitude, longitude);
        coordinate.validate()?;
        Ok(coordinate)
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: ErrorCode,
}

/// Pipeline error rendered as a JSON response
pub struct ApiError(pub AfterglowError);

impl From<AfterglowError> for ApiError {
    fn from(err: AfterglowError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::Validation => StatusCode::BAD_REQUEST,
            ErrorCode::NoUpcomingEvent => StatusCode::NOT_FOUND,
            ErrorCode::OutOfRange
            | ErrorCode::MalformedSeries
            | ErrorCode::IncompleteSnapshot
            | ErrorCode::Fetch => StatusCode::BAD_GATEWAY,
            ErrorCode::Config => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self.0, "Prediction failed");
        }
        let body = ErrorBody {
            error: self.0.user_message(),
            code: self.0.code(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/prediction", get(get_prediction))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: VERSION,
    })
}

async fn get_prediction(
    State(state): State<AppState>,
    Query(query): Query<PredictionQuery>,
) -> Result<Json<Prediction>, ApiError> {
    let base = query.coordinate()?;
    let prediction = SkyForecastService::predict(
        state.provider.as_ref(),
        base,
        Utc::now().timestamp(),
        state.event_source,
    )
    .await?;
    Ok(Json(prediction))
}
