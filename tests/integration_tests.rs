use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use tourbook::handlers;
use tourbook::services::tours::TourService;
use tourbook::state::AppState;

// ── Helpers ──

fn test_state() -> Arc<AppState> {
    Arc::new(AppState {
        tours: Arc::new(TourService::in_memory()),
    })
}

fn test_app(state: Arc<AppState>) -> Router {
    handlers::router(state)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn tour_body(property_id: i64, date: &str, time: &str) -> serde_json::Value {
    serde_json::json!({
        "propertyId": property_id,
        "customerName": "A",
        "customerEmail": "a@x.com",
        "tourDate": date,
        "tourTime": time,
    })
}

async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// ── Tests ──

#[tokio::test]
async fn test_health() {
    let res = test_app(test_state()).oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["status"], "ok");
}

#[tokio::test]
async fn test_create_then_slots() {
    let state = test_state();

    let res = test_app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/tours",
            tour_body(1, "2024-03-01", "9:00 AM"),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let json = body_json(res).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["status"], "pending");
    assert_eq!(json["customerPhone"], "");
    assert_eq!(json["message"], "");

    let res = test_app(state)
        .oneshot(get("/api/properties/1/slots?date=2024-03-01"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let slots = body_json(res).await;
    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 8);
    assert_eq!(slots[0], "10:00 AM");
    assert!(!slots.contains(&serde_json::json!("9:00 AM")));
}

#[tokio::test]
async fn test_double_booking_returns_conflict() {
    let state = test_state();
    let body = tour_body(2, "2024-03-04", "2:00 PM");

    let res = test_app(state.clone())
        .oneshot(json_request("POST", "/api/tours", body.clone()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = test_app(state.clone())
        .oneshot(json_request("POST", "/api/tours", body))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let json = body_json(res).await;
    assert!(json["error"].as_str().unwrap().contains("already booked"));

    let res = test_app(state).oneshot(get("/api/tours")).await.unwrap();
    assert_eq!(body_json(res).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_email_returns_bad_request() {
    let state = test_state();
    let mut body = tour_body(1, "2024-03-01", "9:00 AM");
    body.as_object_mut().unwrap().remove("customerEmail");

    let res = test_app(state.clone())
        .oneshot(json_request("POST", "/api/tours", body))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = test_app(state).oneshot(get("/api/tours")).await.unwrap();
    assert!(body_json(res).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cancel_then_rebook() {
    let state = test_state();
    let body = tour_body(3, "2024-03-05", "11:00 AM");

    test_app(state.clone())
        .oneshot(json_request("POST", "/api/tours", body.clone()))
        .await
        .unwrap();

    let res = test_app(state.clone())
        .oneshot(json_request(
            "PATCH",
            "/api/tours/1",
            serde_json::json!({ "status": "cancelled" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["status"], "cancelled");

    let res = test_app(state.clone())
        .oneshot(json_request("POST", "/api/tours", body))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(body_json(res).await["id"], 2);

    let res = test_app(state)
        .oneshot(get("/api/properties/3/tours"))
        .await
        .unwrap();
    let tours = body_json(res).await;
    assert_eq!(tours.as_array().unwrap().len(), 2);
    assert_eq!(tours[0]["status"], "cancelled");
    assert_eq!(tours[1]["status"], "pending");
}

#[tokio::test]
async fn test_patch_cannot_change_id() {
    let state = test_state();
    test_app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/tours",
            tour_body(1, "2024-03-01", "9:00 AM"),
        ))
        .await
        .unwrap();

    let res = test_app(state.clone())
        .oneshot(json_request(
            "PATCH",
            "/api/tours/1",
            serde_json::json!({ "id": 999, "status": "confirmed" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["status"], "confirmed");

    let res = test_app(state).oneshot(get("/api/tours/999")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete() {
    let state = test_state();
    test_app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/tours",
            tour_body(1, "2024-03-01", "9:00 AM"),
        ))
        .await
        .unwrap();

    let delete = |uri: &str| {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    };

    let res = test_app(state.clone())
        .oneshot(delete("/api/tours/42"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = test_app(state.clone())
        .oneshot(delete("/api/tours/1"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["customerName"], "A");

    let res = test_app(state).oneshot(get("/api/tours")).await.unwrap();
    assert!(body_json(res).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_slots_require_valid_date() {
    let state = test_state();

    let res = test_app(state.clone())
        .oneshot(get("/api/properties/1/slots"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = test_app(state)
        .oneshot(get("/api/properties/1/slots?date=tomorrow"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tour_dates() {
    let res = test_app(test_state())
        .oneshot(get("/api/tour-dates?count=5"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let dates = body_json(res).await;
    assert_eq!(dates.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_calendar_download() {
    let state = test_state();
    let mut body = tour_body(8, "2025-06-16", "2:00 PM");
    body["message"] = serde_json::json!("Ground floor unit");
    test_app(state.clone())
        .oneshot(json_request("POST", "/api/tours", body))
        .await
        .unwrap();

    let res = test_app(state.clone())
        .oneshot(get("/api/tours/1/calendar.ics"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "text/calendar; charset=utf-8"
    );

    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("BEGIN:VEVENT"));
    assert!(text.contains("DTSTART:20250616T140000"));
    assert!(text.contains("SUMMARY:Property tour: property 8"));
    assert!(text.contains("DESCRIPTION:Ground floor unit"));

    let res = test_app(state)
        .oneshot(get("/api/tours/2/calendar.ics"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_typed_fields_return_json_bad_request() {
    let state = test_state();

    let mut body = tour_body(1, "2024-03-01", "9:00 AM");
    body["tourDate"] = serde_json::json!(20240301);
    let res = test_app(state.clone())
        .oneshot(json_request("POST", "/api/tours", body))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "application/json"
    );
    let json = body_json(res).await;
    assert!(json["error"].as_str().unwrap().contains("tourDate"));

    let mut body = tour_body(1, "2024-03-01", "9:00 AM");
    body["propertyId"] = serde_json::json!("abc");
    let res = test_app(state.clone())
        .oneshot(json_request("POST", "/api/tours", body))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(res).await["error"].is_string());

    test_app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/tours",
            tour_body(1, "2024-03-01", "9:00 AM"),
        ))
        .await
        .unwrap();
    let res = test_app(state.clone())
        .oneshot(json_request(
            "PATCH",
            "/api/tours/1",
            serde_json::json!({ "status": "bogus" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(res).await["error"].is_string());

    let res = test_app(state).oneshot(get("/api/tours/1")).await.unwrap();
    assert_eq!(body_json(res).await["status"], "pending");
}

#[tokio::test]
async fn test_property_id_posted_as_text() {
    let state = test_state();
    let mut body = tour_body(1, "2024-03-01", "9:00 AM");
    body["propertyId"] = serde_json::json!("4");

    let res = test_app(state)
        .oneshot(json_request("POST", "/api/tours", body))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(body_json(res).await["propertyId"], 4);
}
