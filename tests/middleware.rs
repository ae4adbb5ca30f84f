use std::sync::Arc;

use actix_identity::{Identity, IdentityMiddleware};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{
    App, HttpMessage, HttpRequest, HttpResponse,
    http::{StatusCode, header},
    test, web,
};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crm_desk::domain::user::User;
use crm_desk::middleware::SessionGate;
use crm_desk::repository::MemoryRepository;
use crm_desk::routes::main::show_entry;
use crm_desk::shell::ShellLayout;

const SEED: &str = r#"{
    "users": [
        {"id": "u-1", "name": "Ana Lopez", "email": "ana@example.com", "role": "manager"}
    ]
}"#;

async fn sign_in_as(req: HttpRequest, id: web::Path<String>) -> HttpResponse {
    match Identity::login(&req.extensions(), id.into_inner()) {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

async fn whoami(req: HttpRequest) -> HttpResponse {
    let extensions = req.extensions();
    match (extensions.get::<User>(), extensions.get::<ShellLayout>()) {
        (Some(user), Some(layout)) if layout.transition_key() == req.path() => {
            HttpResponse::Ok().body(user.name.clone())
        }
        _ => HttpResponse::InternalServerError().finish(),
    }
}

macro_rules! desk_app {
    () => {{
        let repo = MemoryRepository::from_json(SEED).unwrap();
        App::new()
            .route("/test-login/{id}", web::post().to(sign_in_as))
            .service(
                web::scope("")
                    .wrap(SessionGate::new(Arc::new(repo)))
                    .route("/", web::get().to(|| async { HttpResponse::Ok().finish() }))
                    .route("/dashboard", web::get().to(whoami)),
            )
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                    .cookie_secure(false)
                    .build(),
            )
    }};
}

macro_rules! entry_app {
    () => {{
        let repo = MemoryRepository::from_json(SEED).unwrap();
        let key = Key::generate();
        let tera = Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*")).unwrap();
        let store = CookieMessageStore::builder(key.clone()).build();
        let flash = FlashMessagesFramework::builder(store).build();
        App::new()
            .route("/test-login/{id}", web::post().to(sign_in_as))
            .service(
                web::scope("")
                    .wrap(SessionGate::new(Arc::new(repo)))
                    .service(show_entry),
            )
            .app_data(web::Data::new(tera))
            .wrap(flash)
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key)
                    .cookie_secure(false)
                    .build(),
            )
    }};
}

#[actix_web::test]
async fn protected_route_without_session_redirects_to_entry() {
    let app = test::init_service(desk_app!()).await;

    let req = test::TestRequest::get().uri("/dashboard").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
}

#[actix_web::test]
async fn entry_route_is_public() {
    let app = test::init_service(desk_app!()).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn signed_in_user_reaches_protected_route() {
    let app = test::init_service(desk_app!()).await;

    let login = test::TestRequest::post().uri("/test-login/u-1").to_request();
    let resp = test::call_service(&app, login).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookies: Vec<_> = resp.response().cookies().map(|c| c.into_owned()).collect();
    assert!(!cookies.is_empty());

    let mut req = test::TestRequest::get().uri("/dashboard");
    for cookie in cookies {
        req = req.cookie(cookie);
    }
    let body = test::call_and_read_body(&app, req.to_request()).await;

    assert_eq!(body, "Ana Lopez");
}

#[actix_web::test]
async fn identity_without_matching_user_is_redirected() {
    let app = test::init_service(desk_app!()).await;

    let login = test::TestRequest::post().uri("/test-login/u-404").to_request();
    let resp = test::call_service(&app, login).await;
    let cookies: Vec<_> = resp.response().cookies().map(|c| c.into_owned()).collect();

    let mut req = test::TestRequest::get().uri("/dashboard");
    for cookie in cookies {
        req = req.cookie(cookie);
    }
    let resp = test::call_service(&app, req.to_request()).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[actix_web::test]
async fn signed_in_user_can_still_open_the_entry_page() {
    let app = test::init_service(entry_app!()).await;

    let login = test::TestRequest::post().uri("/test-login/u-1").to_request();
    let resp = test::call_service(&app, login).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookies: Vec<_> = resp.response().cookies().map(|c| c.into_owned()).collect();

    let mut req = test::TestRequest::get().uri("/");
    for cookie in cookies {
        req = req.cookie(cookie);
    }
    let resp = test::call_service(&app, req.to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::LOCATION).is_none());
    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("Signed in as Ana Lopez"));
    assert!(body.contains("action=\"/login\""));
}

#[actix_web::test]
async fn anonymous_entry_page_renders_the_sign_in_form() {
    let app = test::init_service(entry_app!()).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(!body.contains("Signed in as"));
}
