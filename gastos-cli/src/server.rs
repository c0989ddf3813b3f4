//! HTTP server - the dashboard's read-only API
//!
//! - `GET /api/sheets[?range=]` raw cells of one range
//! - `GET /api/summary[?range=]` the aggregated summary
//! - `GET /healthz` liveness
//!
//! Every `/api` route goes through the identity gate when one is
//! configured. Bodies are `OperationResult` JSON; failures carry the HTTP
//! status of the underlying error.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use gastos_core::services::{DashboardReport, DashboardService, IdentityGate};
use gastos_core::{Error, LogEvent, LoggingService, OperationResult, Principal};

/// Shared, immutable server state
pub struct AppState {
    pub dashboard: DashboardService,
    pub gate: Option<IdentityGate>,
    pub logger: Option<LoggingService>,
}

impl AppState {
    fn log(&self, event: LogEvent) {
        if let Some(logger) = &self.logger {
            let _ = logger.log(event);
        }
    }

    /// Run the gate, if any, against the request headers
    async fn authorize(&self, route: &str, headers: &HeaderMap) -> Result<Option<Principal>, Error> {
        let Some(gate) = &self.gate else {
            return Ok(None);
        };

        let header = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok());
        match gate.authorize(header).await {
            Ok(principal) => Ok(Some(principal)),
            Err(e) => {
                self.log(
                    LogEvent::new("request_rejected")
                        .with_route(route)
                        .with_source(gate.provider_name())
                        .with_error(e.to_string()),
                );
                Err(e)
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub range: Option<String>,
}

/// `/api/summary` body
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryPayload {
    spreadsheet_id: String,
    range: String,
    source: String,
    summary: gastos_core::Summary,
}

impl From<DashboardReport> for SummaryPayload {
    fn from(report: DashboardReport) -> Self {
        Self {
            spreadsheet_id: report.spreadsheet_id,
            range: report.range,
            source: report.source,
            summary: report.summary,
        }
    }
}

fn failure(error: &Error) -> Response {
    let status = StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(OperationResult::<()>::fail(error.to_string()))).into_response()
}

fn success<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(OperationResult::ok(data))).into_response()
}

async fn sheets(State(state): State<Arc<AppState>>, headers: HeaderMap, Query(query): Query<RangeQuery>) -> Response {
    const ROUTE: &str = "/api/sheets";
    if let Err(e) = state.authorize(ROUTE, &headers).await {
        return failure(&e);
    }

    match state.dashboard.fetch(query.range.as_deref()).await {
        Ok(values) => {
            state.log(
                LogEvent::new("sheet_read")
                    .with_route(ROUTE)
                    .with_source(state.dashboard.source_name()),
            );
            success(values)
        }
        Err(e) => {
            state.log(
                LogEvent::new("sheet_read_failed")
                    .with_route(ROUTE)
                    .with_source(state.dashboard.source_name())
                    .with_error(e.to_string()),
            );
            failure(&e)
        }
    }
}

async fn summary(State(state): State<Arc<AppState>>, headers: HeaderMap, Query(query): Query<RangeQuery>) -> Response {
    const ROUTE: &str = "/api/summary";
    if let Err(e) = state.authorize(ROUTE, &headers).await {
        return failure(&e);
    }

    match state.dashboard.summary(query.range.as_deref()).await {
        Ok(report) => {
            state.log(
                LogEvent::new("summary_read")
                    .with_route(ROUTE)
                    .with_source(state.dashboard.source_name()),
            );
            success(SummaryPayload::from(report))
        }
        Err(e) => {
            state.log(
                LogEvent::new("summary_read_failed")
                    .with_route(ROUTE)
                    .with_source(state.dashboard.source_name())
                    .with_error(e.to_string()),
            );
            failure(&e)
        }
    }
}

async fn healthz() -> &'static str {
    "ok"
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/sheets", get(sheets))
        .route("/api/summary", get(summary))
        .route("/healthz", get(healthz))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use gastos_core::domain::AllowList;
    use gastos_core::ports::{IdentityProvider, SheetSource};
    use gastos_core::{ColumnPolicy, CoreResult, Grid, SheetValues};
    use tower::ServiceExt;

    struct FixedSource;

    #[async_trait]
    impl SheetSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch_range(&self, spreadsheet_id: &str, range: &str) -> CoreResult<SheetValues> {
            if range.starts_with("broken") {
                return Err(Error::fetch("Unable to parse range"));
            }
            Ok(SheetValues {
                spreadsheet_id: spreadsheet_id.to_string(),
                range: range.to_string(),
                values: Grid::from_text(vec![
                    vec!["TOTAL_INGRESOS", "OCIO", "AHORRO"],
                    vec!["1.234,56", "100", "50"],
                    vec!["", "", ""],
                ]),
            })
        }
    }

    struct TokenProvider;

    #[async_trait]
    impl IdentityProvider for TokenProvider {
        fn name(&self) -> &str {
            "token"
        }

        async fn verify(&self, token: &str) -> CoreResult<Principal> {
            match token {
                "owner" => Ok(Principal::new("owner-uid", Some("owner@example.com".to_string()))),
                "stranger" => Ok(Principal::new("stranger-uid", None)),
                _ => Err(Error::Unauthenticated),
            }
        }
    }

    fn app(with_gate: bool) -> Router {
        let dashboard = DashboardService::new(
            Arc::new(FixedSource),
            Some("sheet-1".to_string()),
            "2025!A1:Z",
            ColumnPolicy::headers(),
        );
        let gate = with_gate.then(|| {
            IdentityGate::new(
                Arc::new(TokenProvider),
                AllowList {
                    uid: Some("owner-uid".to_string()),
                    email: None,
                },
            )
        });
        router(Arc::new(AppState {
            dashboard,
            gate,
            logger: None,
        }))
    }

    async fn get_json(app: Router, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut request = Request::builder().uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let response = app.oneshot(request.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_sheets_payload_shape() {
        let (status, body) = get_json(app(true), "/api/sheets", Some("owner")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["spreadsheetId"], "sheet-1");
        assert_eq!(body["range"], "2025!A1:Z");
        assert_eq!(body["values"][0][0], "TOTAL_INGRESOS");
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_range_query_override() {
        let (_, body) = get_json(app(false), "/api/sheets?range=2024!A1:C", None).await;
        assert_eq!(body["range"], "2024!A1:C");
    }

    #[tokio::test]
    async fn test_summary_payload_shape() {
        let (status, body) = get_json(app(true), "/api/summary", Some("owner")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["summary"]["rowsUsed"], 1);
        assert_eq!(body["summary"]["income"], 1234.56);
        assert_eq!(body["summary"]["expenses"], 100.0);
        assert_eq!(body["summary"]["savings"], 50.0);
    }

    #[tokio::test]
    async fn test_auth_failures() {
        let (status, body) = get_json(app(true), "/api/sheets", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["ok"], false);

        let (status, _) = get_json(app(true), "/api/summary", Some("forged")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = get_json(app(true), "/api/sheets", Some("stranger")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Forbidden");
    }

    #[tokio::test]
    async fn test_fetch_failure_is_500() {
        let (status, body) = get_json(app(false), "/api/sheets?range=broken!A1", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["ok"], false);
        assert!(body["error"].as_str().unwrap().contains("Unable to parse range"));
    }

    #[tokio::test]
    async fn test_healthz() {
        let response = app(true)
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
