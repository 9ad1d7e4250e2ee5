//! Tests for report HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web, App};
use chrono::{Duration, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{BookingPayload, MockBookingQuery};
use crate::domain::{BookingStatus, Role};
use crate::inbound::http::auth::{USER_ID_HEADER, USER_ROLE_HEADER};

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .service(user_report)
            .service(overview_report),
    )
}

fn with_identity(
    request: actix_test::TestRequest,
    role: Role,
) -> actix_test::TestRequest {
    request
        .insert_header((USER_ID_HEADER, Uuid::new_v4().to_string()))
        .insert_header((USER_ROLE_HEADER, role.as_str()))
}

fn payload_with_status(status: BookingStatus) -> BookingPayload {
    let start = Utc::now() + Duration::hours(1);
    BookingPayload {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        equipment_id: Uuid::new_v4(),
        start,
        end: start + Duration::hours(2),
        purpose: "spectrometer run".to_owned(),
        status,
        created_at: Utc::now(),
    }
}

#[actix_web::test]
async fn user_report_counts_by_status() {
    let mut query = MockBookingQuery::new();
    query.expect_list_own_bookings().return_once(|_| {
        Ok(vec![
            payload_with_status(BookingStatus::Pending),
            payload_with_status(BookingStatus::Confirmed),
            payload_with_status(BookingStatus::Confirmed),
            payload_with_status(BookingStatus::Cancelled),
        ])
    });
    let state = HttpState {
        bookings_query: Arc::new(query),
        ..HttpState::fixture()
    };

    let app = actix_test::init_service(test_app(state)).await;
    let request = with_identity(actix_test::TestRequest::get(), Role::User)
        .uri("/api/v1/reports/mine")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.pointer("/bookings/pending").and_then(Value::as_u64), Some(1));
    assert_eq!(
        body.pointer("/bookings/confirmed").and_then(Value::as_u64),
        Some(2)
    );
    assert_eq!(body.get("total").and_then(Value::as_u64), Some(4));
    assert_eq!(body.get("active").and_then(Value::as_u64), Some(3));
}

#[actix_web::test]
async fn user_report_handles_no_bookings() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let request = with_identity(actix_test::TestRequest::get(), Role::User)
        .uri("/api/v1/reports/mine")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("total").and_then(Value::as_u64), Some(0));
    assert_eq!(body.get("active").and_then(Value::as_u64), Some(0));
}

#[actix_web::test]
async fn overview_report_is_admin_only() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let request = with_identity(actix_test::TestRequest::get(), Role::User)
        .uri("/api/v1/reports/overview")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn overview_report_includes_equipment_counts() {
    let app = actix_test::init_service(test_app(HttpState::fixture())).await;
    let request = with_identity(actix_test::TestRequest::get(), Role::Admin)
        .uri("/api/v1/reports/overview")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.pointer("/equipment/totalEquipment")
            .and_then(Value::as_u64),
        Some(0)
    );
    assert_eq!(
        body.pointer("/bookings/pending").and_then(Value::as_u64),
        Some(0)
    );
}
