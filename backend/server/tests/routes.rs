use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use catalog::{Catalog, variant::SiteVariant};
use coverage::MatchMode;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use server::{
    baas::{
        AppMetadata, Baas, BaasError, NewOrder, NewTestimonial, Order, Session, SignUpOutcome,
        Testimonial, TestimonialStatus, User,
    },
    build_router,
    config::Config,
    state::State,
};
use tokio::sync::Mutex;
use tower::ServiceExt;

const PASSWORD: &str = "correct horse";

#[derive(Default)]
struct FakeBaas {
    testimonials: Mutex<Vec<Testimonial>>,
    orders: Mutex<Vec<Order>>,
    magic_links: Mutex<Vec<(String, String)>>,
}

fn user(id: &str, role: Option<&str>) -> User {
    User {
        id: id.to_string(),
        email: Some(format!("{id}@example.com")),
        app_metadata: AppMetadata {
            role: role.map(str::to_string),
        },
    }
}

fn rejected(status: u16) -> BaasError {
    BaasError::Rejected {
        status,
        message: "nope".to_string(),
    }
}

#[async_trait]
impl Baas for FakeBaas {
    async fn sign_up(&self, _email: &str, _password: &str) -> Result<SignUpOutcome, BaasError> {
        Ok(SignUpOutcome::ConfirmEmail)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BaasError> {
        if password != PASSWORD {
            return Err(rejected(400));
        }

        Ok(Session {
            access_token: "user-token".to_string(),
            refresh_token: "refresh".to_string(),
            expires_in: 3600,
            user: User {
                email: Some(email.to_string()),
                ..user("diner", None)
            },
        })
    }

    async fn send_magic_link(&self, email: &str, redirect_to: &str) -> Result<(), BaasError> {
        self.magic_links
            .lock()
            .await
            .push((email.to_string(), redirect_to.to_string()));
        Ok(())
    }

    async fn user_for_token(&self, access_token: &str) -> Result<User, BaasError> {
        match access_token {
            "admin-token" => Ok(user("owner", Some("admin"))),
            "user-token" => Ok(user("diner", None)),
            _ => Err(rejected(401)),
        }
    }

    async fn list_testimonials(
        &self,
        status: Option<TestimonialStatus>,
    ) -> Result<Vec<Testimonial>, BaasError> {
        Ok(self
            .testimonials
            .lock()
            .await
            .iter()
            .filter(|t| status.is_none_or(|s| s == t.status))
            .cloned()
            .collect())
    }

    async fn insert_testimonial(&self, new: &NewTestimonial) -> Result<Testimonial, BaasError> {
        let mut testimonials = self.testimonials.lock().await;
        let testimonial = Testimonial {
            id: format!("t{}", testimonials.len() + 1),
            author: new.author.clone(),
            quote: new.quote.clone(),
            rating: new.rating,
            status: TestimonialStatus::Pending,
            created_at: None,
        };

        testimonials.push(testimonial.clone());
        Ok(testimonial)
    }

    async fn set_testimonial_status(
        &self,
        id: &str,
        status: TestimonialStatus,
    ) -> Result<Option<Testimonial>, BaasError> {
        if !id.strip_prefix('t').is_some_and(|n| n.parse::<u32>().is_ok()) {
            return Err(BaasError::Rejected {
                status: 400,
                message: format!("invalid input syntax for type uuid: {id:?}"),
            });
        }

        let mut testimonials = self.testimonials.lock().await;

        Ok(testimonials.iter_mut().find(|t| t.id == id).map(|t| {
            t.status = status;
            t.clone()
        }))
    }

    async fn list_orders(&self) -> Result<Vec<Order>, BaasError> {
        Ok(self.orders.lock().await.clone())
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<Order, BaasError> {
        let mut orders = self.orders.lock().await;
        let order = Order {
            id: format!("o{}", orders.len() + 1),
            email: order.email.clone(),
            network: order.network,
            token: order.token,
            amount: order.amount.clone(),
            total_cents: order.total_cents,
            tx_hash: order.tx_hash.clone(),
            receipt: order.receipt,
            created_at: None,
        };

        orders.push(order.clone());
        Ok(order)
    }
}

fn test_config() -> Config {
    Config {
        check_delay: Duration::ZERO,
        signup_password: "open sesame".to_string(),
        merchant_wallet: "0x1111111111111111111111111111111111111111".to_string(),
        ..Config::default()
    }
}

fn app_with(config: Config) -> (Router, Arc<FakeBaas>) {
    let baas = Arc::new(FakeBaas::default());
    let state = State::new(config, Catalog::bundled().expect("bundled catalog"), baas.clone());

    (build_router(state), baas)
}

fn app() -> (Router, Arc<FakeBaas>) {
    app_with(test_config())
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    builder.body(Body::empty()).expect("request")
}

fn send_json(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    builder.body(Body::from(body.to_string())).expect("request")
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();

    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, body)
}

async fn check(app: &Router, input: &str) -> (StatusCode, Value) {
    call(
        app,
        send_json("POST", "/api/delivery-check", json!({ "input": input }), None),
    )
    .await
}

#[tokio::test]
async fn delivery_check_end_to_end() {
    let (app, _) = app();

    let (status, body) = check(&app, "94107").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "yes");
    assert_eq!(body["tone"], "affirmative");
    assert_eq!(body["layout"], "full");
    assert!(body["message"].as_str().unwrap().contains("Bay Area"));

    let (_, body) = check(&app, "10001").await;
    assert_eq!(body["status"], "no");

    let (_, body) = check(&app, "Petaluma, CA").await;
    assert_eq!(body["status"], "yes");

    let (status, body) = check(&app, "   ").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn delivery_check_echoes_layout() {
    let (app, _) = app();

    let (_, body) = call(
        &app,
        send_json(
            "POST",
            "/api/delivery-check",
            json!({ "input": "sf", "layout": "compact" }),
            None,
        ),
    )
    .await;

    assert_eq!(body["status"], "yes");
    assert_eq!(body["layout"], "compact");
}

#[tokio::test]
async fn strict_postal_ignores_street_numbers() {
    let (loose, _) = app();
    let (strict, _) = app_with(Config {
        match_mode: MatchMode::LeadingPostal,
        ..test_config()
    });

    let (_, body) = check(&loose, "9410 Elm St, Portland 97201").await;
    assert_eq!(body["status"], "yes");

    let (_, body) = check(&strict, "9410 Elm St, Portland 97201").await;
    assert_eq!(body["status"], "no");
}

#[tokio::test]
async fn marketing_pages_follow_the_site_variant() {
    let (app, _) = app();

    let (status, body) = call(&app, get("/api/pages/home", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["variant"], "delivery");
    assert_eq!(body["meta"]["title"], "Hearth Kitchen");
    assert!(body["nav"].as_array().unwrap().len() > 4);

    let (catering, _) = app_with(Config {
        variant: SiteVariant::Catering,
        ..test_config()
    });
    let (_, body) = call(&catering, get("/api/pages/chef", None)).await;
    assert_eq!(body["brand"], "Hearth Catering");
    assert_eq!(body["meta"]["canonical_url"], "https://catering.hearthkitchen.co/chef");

    let (status, _) = call(&app, get("/api/pages/admin", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn nav_palette_filters() {
    let (app, _) = app();

    let (_, body) = call(&app, get("/api/nav?q=check", None)).await;
    let paths: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["path"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(paths, vec!["/checkout"]);
}

#[tokio::test]
async fn weekly_menu_navigation() {
    let (app, _) = app();

    let (status, body) = call(&app, get("/api/menus/week?date=2026-10-17", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["menu"]["week_of"], "2026-10-12");
    assert_eq!(body["week"]["label"], "Oct 12 - Oct 18");
    assert_eq!(body["previous"], "2026-10-05");
    assert_eq!(body["next"], "2026-10-19");

    let (status, _) = call(&app, get("/api/menus/week?date=2026-10-28", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, get("/api/menus/week?date=tomorrow", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, get("/api/menus/week?date=-262143-01-01", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = call(&app, get("/api/menus/weeks", None)).await;
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn signup_is_password_gated() {
    let (app, _) = app();

    let (status, _) = call(
        &app,
        send_json(
            "POST",
            "/api/auth/signup",
            json!({ "email": "new@example.com", "password": PASSWORD, "access_password": "guess" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(
        &app,
        send_json(
            "POST",
            "/api/auth/signup",
            json!({ "email": "new@example.com", "password": "short", "access_password": "open sesame" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(
        &app,
        send_json(
            "POST",
            "/api/auth/signup",
            json!({ "email": "new@example.com", "password": PASSWORD, "access_password": "open sesame" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "confirm_email");
}

#[tokio::test]
async fn signup_closed_without_configured_password() {
    let (app, _) = app_with(Config {
        signup_password: String::new(),
        ..test_config()
    });

    let (status, _) = call(
        &app,
        send_json(
            "POST",
            "/api/auth/signup",
            json!({ "email": "new@example.com", "password": PASSWORD, "access_password": "" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn login_and_magic_link() {
    let (app, baas) = app();

    let (status, _) = call(
        &app,
        send_json(
            "POST",
            "/api/auth/login",
            json!({ "email": "diner@example.com", "password": "wrong" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = call(
        &app,
        send_json(
            "POST",
            "/api/auth/login",
            json!({ "email": "Diner@Example.com", "password": PASSWORD }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["access_token"], "user-token");
    assert_eq!(body["user"]["email"], "diner@example.com");

    let (status, _) = call(
        &app,
        send_json(
            "POST",
            "/api/auth/magic-link",
            json!({ "email": "diner@example.com" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(
        baas.magic_links.lock().await.as_slice(),
        [(
            "diner@example.com".to_string(),
            "https://hearthkitchen.co/".to_string()
        )]
    );
}

#[tokio::test]
async fn testimonial_moderation() {
    let (app, _) = app();

    let (status, body) = call(
        &app,
        send_json(
            "POST",
            "/api/testimonials",
            json!({ "author": "Sam", "quote": "Best tagine in Oakland", "rating": 5 }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    let id = body["id"].as_str().unwrap().to_string();

    let (status, _) = call(
        &app,
        send_json(
            "POST",
            "/api/testimonials",
            json!({ "author": "Sam", "quote": "meh", "rating": 9 }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, get("/api/admin/testimonials", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(&app, get("/api/admin/testimonials", Some("user-token"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(&app, get("/api/admin/testimonials", Some("stale"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = call(
        &app,
        get("/api/admin/testimonials?status=pending", Some("admin-token")),
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = call(
        &app,
        send_json(
            "PATCH",
            &format!("/api/admin/testimonials/{id}"),
            json!({ "status": "approved" }),
            Some("admin-token"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");

    let (_, body) = call(
        &app,
        get("/api/admin/testimonials?status=pending", Some("admin-token")),
    )
    .await;
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = call(
        &app,
        send_json(
            "PATCH",
            "/api/admin/testimonials/t99",
            json!({ "status": "rejected" }),
            Some("admin-token"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(
        &app,
        send_json(
            "PATCH",
            "/api/admin/testimonials/not-a-uuid",
            json!({ "status": "rejected" }),
            Some("admin-token"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("uuid"));
}

#[tokio::test]
async fn checkout_quote_and_confirm() {
    let (app, _) = app();

    let (_, body) = call(&app, get("/api/checkout/options", None)).await;
    let networks = body.as_array().unwrap();
    assert_eq!(networks.len(), 2);
    assert_eq!(networks[1]["chain_id"], 8453);
    assert_eq!(networks[1]["tokens"].as_array().unwrap().len(), 3);

    let (status, body) = call(
        &app,
        send_json(
            "POST",
            "/api/checkout/quote",
            json!({ "network": "base", "token": "usdc", "total_cents": 2850 }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"], "28500000");
    assert_eq!(body["to"], "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");

    let tx_hash = format!("0x{}", "ab".repeat(32));
    let confirm = |chain_id: u64, hash: &str| {
        send_json(
            "POST",
            "/api/checkout/confirm",
            json!({
                "network": "base",
                "token": "usdc",
                "wallet_chain_id": chain_id,
                "tx_hash": hash,
                "total_cents": 2850,
            }),
            Some("user-token"),
        )
    };

    let (status, _) = call(&app, confirm(1, &tx_hash)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(&app, confirm(8453, "0x1234")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(&app, confirm(8453, &tx_hash)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["receipt"], "pending");
    assert_eq!(body["email"], "diner@example.com");

    let (_, body) = call(&app, get("/api/admin/orders", Some("admin-token"))).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["tx_hash"], tx_hash);
}

#[tokio::test]
async fn confirm_requires_sign_in() {
    let (app, _) = app();

    let (status, _) = call(
        &app,
        send_json(
            "POST",
            "/api/checkout/confirm",
            json!({
                "network": "ethereum",
                "token": "eth",
                "wallet_chain_id": 1,
                "tx_hash": format!("0x{}", "00".repeat(32)),
                "total_cents": 100,
            }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
