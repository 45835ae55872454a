//! HTTP routes.

use std::sync::Arc;

use axum::{routing::get, Router};
use fluid_calc_core::FluidCalcCore;
use handlebars::TemplateError;
use tower_http::trace::TraceLayer;

use crate::handlers::{list_records, show_form, show_record, submit_form};
use crate::render::Templates;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub core: FluidCalcCore,
    pub templates: Arc<Templates>,
}

impl AppState {
    pub fn new(core: FluidCalcCore) -> Result<Self, TemplateError> {
        Ok(Self {
            core,
            templates: Arc::new(Templates::new()?),
        })
    }
}

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .route("/records/{id}", get(show_record))
        .route("/api/records", get(list_records))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use chrono::Days;
    use fluid_calc_core::{Database, RecordSummary, RuleProfile};
    use tower::ServiceExt;

    fn router(core: FluidCalcCore) -> Router {
        create_router(AppState::new(core).unwrap())
    }

    fn app() -> (Router, FluidCalcCore) {
        let core = FluidCalcCore::open_in_memory(RuleProfile::version_two()).unwrap();
        (router(core.clone()), core)
    }

    /// Core whose storage table is gone, so every query fails.
    fn broken_app() -> Router {
        let db = Database::open_in_memory().unwrap();
        db.conn().execute_batch("DROP TABLE usage_records").unwrap();
        router(FluidCalcCore::with_database(db, RuleProfile::version_two()))
    }

    fn today() -> String {
        chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
    }

    fn post_form(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_get_form() {
        let (app, _) = app();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("<form method=\"post\""));
    }

    #[tokio::test]
    async fn test_submit_valid_form() {
        let (app, core) = app();
        let body = format!("gender=male&age=5&weight=12&date_input={}", today());
        let response = app.oneshot(post_form(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("1200ml"));
        assert!(html.contains("100ml/kg/day"));
        assert_eq!(core.record_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_submit_invalid_form_rerenders() {
        let (app, core) = app();
        let stale = chrono::Local::now()
            .date_naive()
            .checked_sub_days(Days::new(90))
            .unwrap()
            .format("%Y-%m-%d")
            .to_string();
        let body = format!("gender=female&age=3&weight=0&date_input={stale}");
        let response = app.oneshot(post_form(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(response).await;
        assert!(html.contains("Number must be at least 1."));
        assert!(html.contains("within the last 30 days"));
        assert!(html.contains(&format!("value=\"{stale}\"")));
        assert!(html.contains("value=\"female\" checked"));
        assert_eq!(core.record_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_submit_missing_fields() {
        let (app, _) = app();
        let response = app.oneshot(post_form(String::new())).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(response).await;
        assert_eq!(html.matches("This field is required.").count(), 4);
    }

    #[tokio::test]
    async fn test_list_records_json() {
        let (app, _) = app();

        for weight in ["8", "15"] {
            let body = format!("gender=male&age=2&weight={weight}&date_input={}", today());
            let response = app.clone().oneshot(post_form(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/records")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let text = body_text(response).await;
        let records: Vec<RecordSummary> = serde_json::from_str(&text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].weight, 8.0);

        let raw: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(raw[1]["date"], today());
        assert_eq!(raw[1]["gender"], "male");
    }

    #[tokio::test]
    async fn test_show_record() {
        let (app, core) = app();
        let body = format!("gender=female&age=9&weight=25&date_input={}", today());
        app.clone().oneshot(post_form(body)).await.unwrap();
        let id = core.list_records().unwrap()[0].id;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/records/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("2000ml"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/records/999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_submit_storage_failure() {
        let body = format!("gender=male&age=5&weight=12&date_input={}", today());
        let response = broken_app().oneshot(post_form(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = body_text(response).await;
        assert!(html.contains("Something went wrong"));
        assert!(!html.contains("Total daily volume"));
        assert!(!html.contains("1200ml"));
    }

    #[tokio::test]
    async fn test_list_records_storage_failure() {
        let response = broken_app()
            .oneshot(
                Request::builder()
                    .uri("/api/records")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"]["type"], "internal_error");
    }
}
