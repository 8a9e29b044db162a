//! Tests for the profile HTTP handlers.

use super::*;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::configure_api;
use crate::inbound::http::test_utils::{in_memory_state, test_session_middleware};

fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(in_memory_state()).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .configure(configure_api),
    )
}

fn register_request(email: &str, user_type: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({
            "email": email,
            "password": "Abcdef1!",
            "confirmPassword": "Abcdef1!",
            "userType": user_type,
        }))
}

fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    assert!(res.status().is_success(), "registration failed: {}", res.status());
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

#[rstest]
#[actix_web::test]
async fn candidate_upsert_then_reads_back() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = session_cookie(
        &actix_test::call_service(&app, register_request("a@x.com", "candidate").to_request()).await,
    );

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/profile/candidate")
            .cookie(cookie.clone())
            .set_json(json!({ "displayName": "Alice", "sector": ["Tech"] }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let stored: Value = actix_test::read_body_json(res).await;
    assert_eq!(stored["kind"], "candidate");
    assert_eq!(stored["sectors"], json!(["Tech"]));

    let own: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/profile")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(own["displayName"], "Alice");
    assert_eq!(own["jobTitle"], Value::Null);
    assert_eq!(own["tools"], json!([]));

    let public: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/profiles/1").to_request(),
    )
    .await;
    assert_eq!(public, own);
}

#[rstest]
#[actix_web::test]
async fn second_upsert_replaces_the_first() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = session_cookie(
        &actix_test::call_service(&app, register_request("acme@x.com", "company").to_request()).await,
    );

    for body in [
        json!({ "companyName": "Acme", "employeeCount": 12, "headquarters": "Rome" }),
        json!({ "companyName": "Acme Srl" }),
    ] {
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/profile/company")
                .cookie(cookie.clone())
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let stored: ProfileResponse = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/profile")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let ProfileResponse::Company(company) = stored else {
        panic!("expected a company profile");
    };
    assert_eq!(company.company_name, "Acme Srl");
    assert_eq!(company.employee_count, None);
    assert_eq!(company.headquarters, None);
}

#[rstest]
#[actix_web::test]
async fn listings_include_only_named_profiles_across_pages() {
    let app = actix_test::init_service(test_app()).await;
    for (email, name) in [
        ("a@x.com", Some("Alice")),
        ("b@x.com", None),
        ("c@x.com", Some("Carol")),
        ("d@x.com", Some("Dan")),
    ] {
        let cookie = session_cookie(
            &actix_test::call_service(&app, register_request(email, "candidate").to_request())
                .await,
        );
        let Some(name) = name else { continue };
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/profile/candidate")
                .cookie(cookie)
                .set_json(json!({ "displayName": name }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let listed: Vec<Value> = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/candidates").to_request(),
    )
    .await;
    let names: Vec<&str> = listed
        .iter()
        .filter_map(|profile| profile["displayName"].as_str())
        .collect();
    assert_eq!(names, ["Alice", "Carol", "Dan"]);

    let without_profile = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/profiles/2").to_request(),
    )
    .await;
    assert_eq!(without_profile.status(), StatusCode::NOT_FOUND);

    let companies: Vec<Value> = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/companies").to_request(),
    )
    .await;
    assert!(companies.is_empty());
}

#[rstest]
#[actix_web::test]
async fn wrong_kind_is_account_not_found() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = session_cookie(
        &actix_test::call_service(&app, register_request("acme@x.com", "company").to_request()).await,
    );

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/profile/candidate")
            .cookie(cookie)
            .set_json(json!({ "displayName": "Acme" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let error: Value = actix_test::read_body_json(res).await;
    assert_eq!(error["code"], "account_not_found");
}

#[rstest]
#[case(json!({ "displayName": "x".repeat(256) }), "displayName")]
#[case(json!({ "displayName": "Alice", "yearsExperience": 81 }), "yearsExperience")]
#[case(json!({ "displayName": "Alice", "birthDay": 31, "birthMonth": 2, "birthYear": 1990 }), "birthDate")]
#[actix_web::test]
async fn invalid_candidate_fields_are_unprocessable(#[case] body: Value, #[case] field: &str) {
    let app = actix_test::init_service(test_app()).await;
    let cookie = session_cookie(
        &actix_test::call_service(&app, register_request("a@x.com", "candidate").to_request()).await,
    );

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/profile/candidate")
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: Value = actix_test::read_body_json(res).await;
    assert_eq!(error["code"], "invalid_profile");
    assert_eq!(error["details"]["field"], field);
}

#[rstest]
#[case("/api/v1/profiles/0", StatusCode::BAD_REQUEST)]
#[case("/api/v1/profiles/99", StatusCode::NOT_FOUND)]
#[case("/api/v1/profile", StatusCode::UNAUTHORIZED)]
#[actix_web::test]
async fn profile_reads_fail_cleanly(#[case] uri: &str, #[case] expected: StatusCode) {
    let app = actix_test::init_service(test_app()).await;
    let res =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(res.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn writes_require_a_session() {
    let app = actix_test::init_service(test_app()).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/profile/company")
            .set_json(json!({ "companyName": "Acme" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case(json!({ "displayName": "Alice", "yearsExperience": -1 }))]
#[case(json!({ "displayName": "Alice", "tools": "Rust" }))]
#[actix_web::test]
async fn mistyped_candidate_fields_are_unprocessable(#[case] body: Value) {
    let app = actix_test::init_service(test_app()).await;
    let cookie = session_cookie(
        &actix_test::call_service(&app, register_request("a@x.com", "candidate").to_request()).await,
    );

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/profile/candidate")
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: Value = actix_test::read_body_json(res).await;
    assert_eq!(error["code"], "invalid_profile");
    assert_eq!(error["details"]["code"], "malformed_body");
}

#[rstest]
#[actix_web::test]
async fn candidate_work_preferences_and_cv_round_trip() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = session_cookie(
        &actix_test::call_service(&app, register_request("a@x.com", "candidate").to_request()).await,
    );

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/profile/candidate")
            .cookie(cookie)
            .set_json(json!({
                "displayName": "Alice",
                "remoteWork": "hybrid",
                "relocation": "within EU",
                "cv": "cv/alice.pdf",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let public: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/profiles/1").to_request(),
    )
    .await;
    assert_eq!(public["remoteWork"], "hybrid");
    assert_eq!(public["relocation"], "within EU");
    assert_eq!(public["cv"], "cv/alice.pdf");
}
