use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use cpa_intake::config::SessionConfig;
use cpa_intake::wizard::{WizardPages, WizardRouteState, WizardService};
use cpa_intake_web::{with_wizard_routes, InMemorySessionStore};
use lopdf::Document;
use std::sync::Arc;
use tower::ServiceExt;

fn app(store: InMemorySessionStore, cookie: SessionConfig) -> Router {
    with_wizard_routes(WizardRouteState {
        service: Arc::new(WizardService::new(Arc::new(store))),
        pages: Arc::new(WizardPages::new().expect("template parses")),
        cookie,
    })
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request builds")
}

fn post(uri: &str, cookie: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .expect("session cookie issued")
        .to_string()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable")
        .to_vec()
}

#[tokio::test]
async fn health_probe_answers_without_a_session() {
    let response = app(InMemorySessionStore::default(), SessionConfig::default())
        .oneshot(get("/health", None))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body: serde_json::Value =
        serde_json::from_slice(&body_bytes(response).await).expect("json body");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn root_redirects_to_the_wizard() {
    let response = app(InMemorySessionStore::default(), SessionConfig::default())
        .oneshot(get("/", None))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/wizard");
}

#[tokio::test]
async fn secure_cookie_setting_is_honored() {
    let cookie = SessionConfig {
        cookie_name: "prospect".to_string(),
        secure_cookie: true,
        ..SessionConfig::default()
    };
    let response = app(InMemorySessionStore::default(), cookie)
        .oneshot(get("/wizard", None))
        .await
        .expect("router responds");

    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .expect("cookie issued");
    assert!(raw.starts_with("prospect="));
    assert!(raw.ends_with("; Secure"));
}

#[tokio::test]
async fn visitor_walks_the_wizard_and_downloads_the_summary() {
    let store = InMemorySessionStore::default();
    let app = app(store.clone(), SessionConfig::default());

    let first = app
        .clone()
        .oneshot(get("/wizard", None))
        .await
        .expect("router responds");
    let cookie = session_cookie(&first);

    let general = app
        .clone()
        .oneshot(post(
            "/wizard/general",
            &cookie,
            "situation=tax_planning&timeline=within_six_months&complexity=4",
        ))
        .await
        .expect("router responds");
    assert_eq!(general.status(), StatusCode::SEE_OTHER);

    let details = app
        .clone()
        .oneshot(post(
            "/wizard/details",
            &cookie,
            "action=submit&main_concern=Retirement+planning&contact_pref=phone_call&email=&phone=555-1234&interest_confirm=true",
        ))
        .await
        .expect("router responds");
    assert_eq!(details.status(), StatusCode::SEE_OTHER);

    let state = app
        .clone()
        .oneshot(get("/api/v1/wizard", Some(&cookie)))
        .await
        .expect("router responds");
    let view: serde_json::Value =
        serde_json::from_slice(&body_bytes(state).await).expect("json view");
    assert_eq!(view["screen"], "review");

    let download = app
        .clone()
        .oneshot(post("/wizard/generate", &cookie, ""))
        .await
        .expect("router responds");
    assert_eq!(download.status(), StatusCode::OK);
    assert_eq!(download.headers()[header::CONTENT_TYPE], "application/pdf");
    let disposition = download.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .expect("ascii header")
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"CPA_Interest_Summary_"));

    let pdf = Document::load_mem(&body_bytes(download).await).expect("valid pdf");
    let text = pdf.extract_text(&[1]).expect("text extracts");
    assert!(text.contains("Retirement planning"));
    assert!(text.contains("555-1234"));
    assert!(text.contains("Not provided"));

    assert_eq!(store.session_count().expect("count"), 1);

    let reset = app
        .oneshot(post("/wizard/reset", &cookie, ""))
        .await
        .expect("router responds");
    assert_eq!(reset.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.session_count().expect("count"), 0);
}

#[tokio::test]
async fn cookieless_resets_leave_nothing_behind() {
    let store = InMemorySessionStore::default();
    let app = app(store.clone(), SessionConfig::default());

    for _ in 0..25 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/wizard/reset")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    assert_eq!(store.session_count().expect("count"), 0);
}

#[tokio::test]
async fn unconfirmed_details_keep_the_visitor_on_step_two() {
    let app = app(InMemorySessionStore::default(), SessionConfig::default());
    let first = app
        .clone()
        .oneshot(get("/wizard", None))
        .await
        .expect("router responds");
    let cookie = session_cookie(&first);

    app.clone()
        .oneshot(post(
            "/wizard/general",
            &cookie,
            "situation=personal_taxes&timeline=immediately&complexity=3",
        ))
        .await
        .expect("router responds");
    app.clone()
        .oneshot(post(
            "/wizard/details",
            &cookie,
            "action=submit&main_concern=&contact_pref=email&email=a%40b.com&phone=",
        ))
        .await
        .expect("router responds");

    let page = app
        .oneshot(get("/wizard", Some(&cookie)))
        .await
        .expect("router responds");
    let html = String::from_utf8(body_bytes(page).await).expect("utf8 page");
    assert!(html.contains("Step 2: A Few More Details"));
    assert!(html.contains("a@b.com"));
}
