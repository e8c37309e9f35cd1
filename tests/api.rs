#[macro_use]
mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use chrono::Duration;
use serde_json::{json, Value};

use common::{full_ballot, seed_admin, test_config, test_db, ADMIN_EMAIL, ADMIN_PASSWORD};
use rcv_ballot::models::dto::BallotRecord;
use rcv_ballot::utils::jwt;

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Login admin, retourne le JWT
macro_rules! login {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/admin/login")
            .set_json(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body["token"].as_str().unwrap().to_string()
    }};
}

macro_rules! mint {
    ($app:expr, $credential:expr, $count:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/tokens/generate")
            .insert_header(bearer(&$credential))
            .set_json(json!({ "count": $count }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body["codes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c.as_str().unwrap().to_string())
            .collect::<Vec<String>>()
    }};
}

macro_rules! check {
    ($app:expr, $code:expr) => {{
        let req = test::TestRequest::get()
            .uri(&format!("/api/vote/check?token={}", $code))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        body["valid"].as_bool().unwrap()
    }};
}

macro_rules! submit {
    ($app:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/vote")
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

#[actix_web::test]
async fn test_end_to_end_ballot_flow() {
    let db = test_db().await;
    let config = test_config();
    seed_admin(&db).await;
    let app = test_app!(db, config);

    let credential = login!(app);
    let codes = mint!(app, credential, 1);
    assert_eq!(codes.len(), 1);
    let code = &codes[0];

    assert!(check!(app, code));
    // vérifier ne consomme pas le code
    assert!(check!(app, code));

    let ballot = full_ballot();
    let (status, body) = submit!(app, json!({ "token": code, "ballot": ballot }));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));

    assert!(!check!(app, code));

    let req = test::TestRequest::get()
        .uri("/api/admin/votes")
        .insert_header(bearer(&credential))
        .to_request();
    let votes: Vec<BallotRecord> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(votes.len(), 1);
    assert_eq!(&votes[0].token, code);
    assert_eq!(votes[0].ballot, ballot);
}

#[actix_web::test]
async fn test_used_and_unknown_tokens_fail_identically() {
    let db = test_db().await;
    let config = test_config();
    seed_admin(&db).await;
    let app = test_app!(db, config);

    let credential = login!(app);
    let code = mint!(app, credential, 1).remove(0);

    let (status, _) = submit!(app, json!({ "token": code, "ballot": full_ballot() }));
    assert_eq!(status, StatusCode::OK);

    let mut other = full_ballot();
    other.reverse();
    let used = submit!(app, json!({ "token": code, "ballot": other }));
    let unknown = submit!(app, json!({ "token": "no-such-code", "ballot": full_ballot() }));

    assert_eq!(used.0, StatusCode::BAD_REQUEST);
    assert_eq!(used, unknown);
    assert_eq!(used.1, json!({ "error": "Invalid or used token" }));

    // un seul bulletin enregistré
    let req = test::TestRequest::get()
        .uri("/api/admin/votes")
        .insert_header(bearer(&credential))
        .to_request();
    let votes: Vec<BallotRecord> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0].ballot, full_ballot());
}

#[actix_web::test]
async fn test_submit_requires_token_and_ballot() {
    let db = test_db().await;
    let app = test_app!(db, test_config());

    for body in [
        json!({ "ballot": full_ballot() }),
        json!({ "token": "", "ballot": full_ballot() }),
        json!({ "token": "abc" }),
        json!({}),
    ] {
        let (status, body) = submit!(app, body);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Missing token or ballot" }));
    }
}

#[actix_web::test]
async fn test_malformed_json_is_rejected() {
    let db = test_db().await;
    let app = test_app!(db, test_config());

    let req = test::TestRequest::post()
        .uri("/api/vote")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_server_validates_ballot_and_keeps_token_unused() {
    let db = test_db().await;
    let config = test_config();
    seed_admin(&db).await;
    let app = test_app!(db, config);

    let credential = login!(app);
    let code = mint!(app, credential, 1).remove(0);

    let short: Vec<String> = full_ballot().into_iter().take(13).collect();
    let mut duplicated = full_ballot();
    duplicated[13] = duplicated[0].clone();
    let mut unknown = full_ballot();
    unknown[5] = "c999".to_string();

    for ballot in [short, duplicated, unknown] {
        let (status, body) = submit!(app, json!({ "token": code, "ballot": ballot }));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_ne!(body["error"], "Invalid or used token");
    }

    // un bulletin refusé ne consomme pas le code
    assert!(check!(app, code));
}

#[actix_web::test]
async fn test_check_token() {
    let db = test_db().await;
    let app = test_app!(db, test_config());

    let req = test::TestRequest::get().uri("/api/vote/check").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Missing token" }));

    assert!(!check!(app, "unknown-code"));
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
    let db = test_db().await;
    seed_admin(&db).await;
    let app = test_app!(db, test_config());

    let attempt = |email: &str, password: &str| {
        test::TestRequest::post()
            .uri("/api/admin/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request()
    };

    let wrong_password = test::call_service(&app, attempt(ADMIN_EMAIL, "nope")).await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password: Value = test::read_body_json(wrong_password).await;

    let unknown_email = test::call_service(&app, attempt("ghost@example.org", ADMIN_PASSWORD)).await;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email: Value = test::read_body_json(unknown_email).await;

    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password, json!({ "error": "Invalid credentials" }));
}

#[actix_web::test]
async fn test_login_requires_both_fields() {
    let db = test_db().await;
    let app = test_app!(db, test_config());

    for body in [
        json!({ "email": ADMIN_EMAIL }),
        json!({ "password": ADMIN_PASSWORD }),
        json!({ "email": "", "password": ADMIN_PASSWORD }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/admin/login")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Missing credentials" }));
    }
}

#[actix_web::test]
async fn test_credential_is_verified_uniformly() {
    let db = test_db().await;
    let config = test_config();
    let admin = seed_admin(&db).await;
    let app = test_app!(db, config);

    let expired = jwt::generate_token(config.jwt_secret(), admin.id, &admin.email, Duration::seconds(-10)).unwrap();
    let forged = jwt::generate_token(b"another-secret", admin.id, &admin.email, Duration::hours(2)).unwrap();

    let headers: Vec<Option<String>> = vec![
        None,
        Some("Basic abc".to_string()),
        Some("Bearer ".to_string()),
        Some("Bearer not.a.jwt".to_string()),
        Some(format!("Bearer {}", expired)),
        Some(format!("Bearer {}", forged)),
    ];

    for value in headers {
        for (method, uri) in [("GET", "/api/admin/votes"), ("POST", "/api/tokens/generate")] {
            let mut req = match method {
                "GET" => test::TestRequest::get(),
                _ => test::TestRequest::post(),
            }
            .uri(uri);
            if let Some(value) = &value {
                req = req.insert_header((header::AUTHORIZATION, value.clone()));
            }

            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{} {} with {:?}", method, uri, value);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({ "error": "Unauthorized" }));
        }
    }

    // le même admin avec un JWT valide passe
    let valid = jwt::generate_token(config.jwt_secret(), admin.id, &admin.email, Duration::hours(2)).unwrap();
    let req = test::TestRequest::get()
        .uri("/api/admin/votes")
        .insert_header(bearer(&valid))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_generate_tokens() {
    let db = test_db().await;
    seed_admin(&db).await;
    let app = test_app!(db, test_config());
    let credential = login!(app);

    // sans corps: 10 codes
    let req = test::TestRequest::post()
        .uri("/api/tokens/generate")
        .insert_header(bearer(&credential))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let defaults = body["codes"].as_array().unwrap().clone();
    assert_eq!(defaults.len(), 10);

    let codes = mint!(app, credential, 25);
    assert_eq!(codes.len(), 25);

    let mut all: Vec<String> = codes.clone();
    all.extend(defaults.iter().map(|c| c.as_str().unwrap().to_string()));
    let unique: std::collections::HashSet<&String> = all.iter().collect();
    assert_eq!(unique.len(), 35);

    for code in &codes {
        assert!(check!(app, code));
    }
}

#[actix_web::test]
async fn test_generate_tokens_rejects_bad_count() {
    let db = test_db().await;
    seed_admin(&db).await;
    let app = test_app!(db, test_config());
    let credential = login!(app);

    for body in [
        json!({ "count": 0 }),
        json!({ "count": -1 }),
        json!({ "count": "5" }),
        json!({ "count": 1.5 }),
        json!({ "count": 101 }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/tokens/generate")
            .insert_header(bearer(&credential))
            .set_json(body.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", body);
    }

    // la borne elle-même est acceptée
    assert_eq!(mint!(app, credential, 100).len(), 100);
}

#[actix_web::test]
async fn test_candidates_and_health() {
    let db = test_db().await;
    let app = test_app!(db, test_config());

    let req = test::TestRequest::get().uri("/api/candidates").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ballot_size"], 14);
    assert_eq!(body["candidates"].as_array().unwrap().len(), 50);
    assert_eq!(body["candidates"][1]["party"], "Green");

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}
