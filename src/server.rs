use axum::{
    extract::{Form, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::category::{Category, CategoryInfo};
use crate::collector::FormInput;
use crate::config::AppConfig;
use crate::error::InputError;
use crate::model::ModelHandle;
use crate::page;
use crate::presenter::{evaluate, DisplayState, PredictionOut};
use crate::sessions::{self, SessionStore};
use crate::types::PredictionRequest;

// ---------- Server state ----------

#[derive(Clone)]
pub struct AppState {
    pub model: ModelHandle,
    pub sessions: Arc<SessionStore>,
    pub log_predictions: bool,
}

impl AppState {
    pub fn new(model: ModelHandle, cfg: &AppConfig) -> Self {
        Self {
            model,
            sessions: Arc::new(SessionStore::new(cfg.max_sessions)),
            log_predictions: cfg.log_predictions,
        }
    }
}

// ---------- Request types ----------

/// The page form: the five controls plus which button was pressed.
#[derive(Deserialize, Debug, Default)]
pub struct PageForm {
    pub aqi_value: Option<i64>,
    pub co_aqi_value: Option<i64>,
    pub ozone_aqi_value: Option<i64>,
    pub no2_aqi_value: Option<i64>,
    pub country: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

impl PageForm {
    fn inputs(&self) -> FormInput {
        FormInput {
            aqi_value: self.aqi_value,
            co_aqi_value: self.co_aqi_value,
            ozone_aqi_value: self.ozone_aqi_value,
            no2_aqi_value: self.no2_aqi_value,
            country: self.country.clone(),
        }
    }

    fn is_predict(&self) -> bool {
        self.action.as_deref().unwrap_or("predict") == "predict"
    }
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn api_error(status: StatusCode, msg: impl ToString) -> ApiError {
    (status, Json(json!({ "error": msg.to_string() })))
}

// ---------- Session cookie ----------

/// Existing session id from the request, or a fresh one that must be set.
fn session_id(headers: &HeaderMap) -> (String, bool) {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(sessions::session_id_from_cookie)
        .map(|id| (id, false))
        .unwrap_or_else(|| (SessionStore::new_id(), true))
}

fn with_cookie(mut resp: Response, id: &str, is_new: bool) -> Response {
    if is_new {
        if let Ok(v) = HeaderValue::from_str(&sessions::set_cookie_value(id)) {
            resp.headers_mut().insert(header::SET_COOKIE, v);
        }
    }
    resp
}

fn unavailable_page(model: &ModelHandle) -> Option<String> {
    match model {
        ModelHandle::Ready(_) => None,
        ModelHandle::Unavailable { path, reason } => Some(page::render_unavailable(path, reason)),
    }
}

// ---------- Handlers ----------

/// GET / - the page for the caller's session
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(html) = unavailable_page(&state.model) {
        return Html(html).into_response();
    }
    let (id, is_new) = session_id(&headers);
    let html = state.sessions.with_session(&id, |s| page::render(s, false));
    with_cookie(Html(html).into_response(), &id, is_new)
}

/// POST / - store inputs, and predict if the predict button was pressed
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<PageForm>,
) -> Response {
    let Some(predictor) = state.model.predictor().cloned() else {
        let html = unavailable_page(&state.model).unwrap_or_default();
        return (StatusCode::SERVICE_UNAVAILABLE, Html(html)).into_response();
    };

    let (id, is_new) = session_id(&headers);
    let predict = form.is_predict();
    let outcome = state.sessions.with_session(&id, |s| -> Result<String, InputError> {
        s.inputs.apply(&form.inputs())?;
        if predict {
            let request = s.inputs.request();
            if state.log_predictions {
                tracing::info!("session={} request={:?}", id, request);
            }
            match s.submit(predictor.as_ref()) {
                DisplayState::Showing(r) => tracing::info!("session={} category={}", id, r.category),
                DisplayState::Failed(msg) => tracing::warn!("session={} prediction failed: {}", id, msg),
                DisplayState::Empty => {}
            }
        }
        Ok(page::render(s, predict))
    });

    let resp = match outcome {
        Ok(html) => Html(html).into_response(),
        Err(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response(),
    };
    with_cookie(resp, &id, is_new)
}

/// POST /api/predict - stateless JSON prediction
pub async fn api_predict(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionOut>, ApiError> {
    let predictor = state
        .model
        .predictor()
        .ok_or_else(|| api_error(StatusCode::SERVICE_UNAVAILABLE, "model unavailable"))?;

    if state.log_predictions {
        tracing::info!("api request={:?}", request);
    }

    evaluate(&request, predictor.as_ref())
        .map(|result| Json(result.into()))
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))
}

/// GET /api/categories - the reference table
pub async fn categories() -> Json<Vec<&'static CategoryInfo>> {
    Json(Category::ALL.iter().map(|c| c.info()).collect())
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "model": state.model.name(),
        "model_loaded": state.model.is_ready(),
    }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/api/predict", post(api_predict))
        .route("/api/categories", get(categories))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn run(cfg: AppConfig, model: ModelHandle) -> anyhow::Result<()> {
    let state = AppState::new(model, &cfg);
    let app = router(state);

    tracing::info!("listening on {}", cfg.bind_addr);
    let listener = tokio::net::TcpListener::bind(cfg.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Predictor;
    use crate::presenter::tests::{FailingPredictor, FixedPredictor};
    use std::path::PathBuf;

    fn state_with(p: impl Predictor + 'static) -> AppState {
        AppState::new(ModelHandle::Ready(Arc::new(p)), &AppConfig::default())
    }

    fn unavailable_state() -> AppState {
        AppState::new(
            ModelHandle::Unavailable {
                path: PathBuf::from("dt_pipeline.json"),
                reason: "No such file or directory".into(),
            },
            &AppConfig::default(),
        )
    }

    async fn body_text(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn cookie_headers(id: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::COOKIE, HeaderValue::from_str(&format!("aqi_session={id}")).unwrap());
        h
    }

    fn scenario_form(action: &str) -> PageForm {
        PageForm {
            aqi_value: Some(50),
            co_aqi_value: Some(10),
            ozone_aqi_value: Some(20),
            no2_aqi_value: Some(15),
            country: Some("Pakistan".into()),
            action: Some(action.into()),
        }
    }

    #[tokio::test]
    async fn index_sets_session_cookie() {
        let resp = index(State(state_with(FixedPredictor("Good"))), HeaderMap::new()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap().to_string();
        assert!(cookie.starts_with("aqi_session="));
        assert!(body_text(resp).await.contains("Predict AQI Category"));
    }

    #[tokio::test]
    async fn predict_then_reload_keeps_result() {
        let state = state_with(FixedPredictor("Moderate"));
        let resp = submit(State(state.clone()), cookie_headers("abc123"), Form(scenario_form("predict"))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get(header::SET_COOKIE).is_none());
        let html = body_text(resp).await;
        assert!(html.contains("Air quality is acceptable. However, sensitive individuals may experience effects."));
        assert!(html.contains("Prediction completed!"));

        let html = body_text(index(State(state), cookie_headers("abc123")).await).await;
        assert!(html.contains("prediction-box prediction-moderate"));
        assert!(!html.contains("Prediction completed!"));
    }

    #[tokio::test]
    async fn update_action_does_not_predict() {
        let state = state_with(FixedPredictor("Hazardous"));
        let mut form = scenario_form("update");
        form.aqi_value = Some(420);
        let html = body_text(submit(State(state), cookie_headers("beef"), Form(form)).await).await;
        assert!(html.contains("AQI Value: <strong>420</strong>"));
        assert!(!html.contains("prediction-box prediction-hazardous"));
    }

    #[tokio::test]
    async fn failure_is_shown_inline() {
        let state = state_with(FailingPredictor("could not convert string to float"));
        let html = body_text(submit(State(state), cookie_headers("f00d"), Form(scenario_form("predict"))).await).await;
        assert!(html.contains("❌ Error: could not convert string to float"));
    }

    #[tokio::test]
    async fn unknown_country_is_rejected() {
        let state = state_with(FixedPredictor("Good"));
        let mut form = scenario_form("predict");
        form.country = Some("Atlantis".into());
        let resp = submit(State(state), cookie_headers("0a0a"), Form(form)).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn unavailable_model_disables_prediction() {
        let html = body_text(index(State(unavailable_state()), HeaderMap::new()).await).await;
        assert!(html.contains("Model file 'dt_pipeline.json' not found"));
        assert!(!html.contains("<form"));

        let resp = submit(State(unavailable_state()), HeaderMap::new(), Form(scenario_form("predict"))).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let req: PredictionRequest = serde_json::from_value(json!({
            "aqi_value": 50, "co_aqi_value": 10, "ozone_aqi_value": 20,
            "no2_aqi_value": 15, "country": "Pakistan"
        }))
        .unwrap();
        let err = api_predict(State(unavailable_state()), Json(req)).await.unwrap_err();
        assert_eq!(err.0, StatusCode::SERVICE_UNAVAILABLE);

        let Json(h) = health(State(unavailable_state())).await;
        assert_eq!(h["model_loaded"], false);
    }

    #[tokio::test]
    async fn api_predict_reports_category_and_errors() {
        let req: PredictionRequest = serde_json::from_value(json!({
            "aqi_value": 500, "co_aqi_value": 133, "ozone_aqi_value": 235,
            "no2_aqi_value": 91, "country": "India"
        }))
        .unwrap();

        let Json(out) = api_predict(State(state_with(FixedPredictor("Hazardous"))), Json(req))
            .await
            .unwrap();
        assert_eq!(out.category, Category::Hazardous);
        assert_eq!(out.band, "301+");

        let (status, Json(body)) = api_predict(State(state_with(FailingPredictor("boom"))), Json(req))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "boom");

        let (status, _) = api_predict(State(state_with(FixedPredictor("Smog"))), Json(req))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn categories_lists_all_six() {
        let Json(rows) = categories().await;
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].band, "0-50");
        assert_eq!(rows[5].label, "Hazardous");
    }
}
