use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::IntoResponse,
};
use catalog::{
    content::{PageCopy, WeeklyMenu},
    nav::{Destination, NavItem, palette},
    seo::{PageMeta, page_meta},
    variant::SiteVariant,
    weeks::{MenuWeek, parse_date, today},
};
use chrono::NaiveDate;
use coverage::{CheckStatus, DeliveryCheck, Layout, Tone};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::info;

use crate::{
    baas::{NewOrder, NewTestimonial, TestimonialStatus},
    checkout::{
        Network, ReceiptStatus, Token, amount_in_base_units, ensure_network, options,
        transfer_request, validate_tx_hash,
    },
    error::AppError::{self, EmptyInput, Forbidden, MalformedPayload, NotFound},
    state::State,
    utils::{Admin, SignedIn, validate_email, validate_password},
};

type AppState = AxumState<Arc<State>>;

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[derive(Serialize)]
pub struct PageView {
    pub variant: SiteVariant,
    pub brand: &'static str,
    pub meta: PageMeta,
    pub copy: PageCopy,
    pub nav: Vec<NavItem>,
}

pub async fn page_handler(
    AxumState(state): AppState,
    Path(page): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let variant = state.config.variant;
    let destination = Destination::from_page_key(&page).ok_or_else(|| NotFound(page.clone()))?;
    let copy = state
        .catalog
        .page(variant, &page)
        .ok_or_else(|| NotFound(page.clone()))?;

    let view = PageView {
        variant,
        brand: variant.brand(),
        meta: page_meta(variant, destination),
        copy: copy.clone(),
        nav: palette(""),
    };

    Ok(Json(view))
}

#[derive(Deserialize)]
pub struct NavQuery {
    #[serde(default)]
    q: String,
}

pub async fn nav_handler(Query(query): Query<NavQuery>) -> impl IntoResponse {
    Json(palette(&query.q))
}

#[derive(Deserialize)]
pub struct WeekQuery {
    date: Option<String>,
}

#[derive(Serialize)]
pub struct WeekView {
    pub week: MenuWeek,
    pub menu: WeeklyMenu,
    pub previous: Option<NaiveDate>,
    pub next: Option<NaiveDate>,
}

pub async fn week_handler(
    AxumState(state): AppState,
    Query(query): Query<WeekQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = match query.date.as_deref() {
        Some(raw) => parse_date(raw).ok_or_else(|| MalformedPayload(format!("bad date {raw:?}")))?,
        None => today(),
    };

    let menu = state
        .catalog
        .menu_for(date)
        .ok_or_else(|| NotFound(format!("menu for week of {date}")))?;
    let (previous, next) = state.catalog.adjacent_weeks(date);

    let view = WeekView {
        week: MenuWeek::containing(date),
        menu: menu.clone(),
        previous,
        next,
    };

    Ok(Json(view))
}

pub async fn weeks_handler(AxumState(state): AppState) -> impl IntoResponse {
    Json(state.catalog.weeks())
}

pub async fn reviews_handler(AxumState(state): AppState) -> impl IntoResponse {
    Json(state.catalog.reviews.clone())
}

pub async fn suppliers_handler(AxumState(state): AppState) -> impl IntoResponse {
    Json(state.catalog.suppliers.clone())
}

#[derive(Deserialize)]
pub struct CheckRequest {
    input: String,
    #[serde(default)]
    layout: Layout,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CheckResponse {
    pub status: CheckStatus,
    pub message: String,
    pub tone: Tone,
    pub layout: Layout,
}

pub async fn delivery_check_handler(
    AxumState(state): AppState,
    Json(payload): Json<CheckRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut check = DeliveryCheck::new();
    check.set_input(payload.input);

    let pending = check.submit().ok_or(EmptyInput)?;

    sleep(state.config.check_delay).await;

    let result = check.resolve(pending, &state.matcher());

    #[cfg(feature = "verbose")]
    info!("Delivery check {:?} -> {:?}", check.input(), result.status);

    Ok(Json(CheckResponse {
        status: result.status,
        tone: result.status.tone(),
        message: result.message,
        layout: payload.layout,
    }))
}

#[derive(Deserialize)]
pub struct SignUpRequest {
    email: String,
    password: String,
    access_password: String,
}

pub async fn signup_handler(
    AxumState(state): AppState,
    Json(payload): Json<SignUpRequest>,
) -> Result<impl IntoResponse, AppError> {
    let expected = &state.config.signup_password;

    if expected.is_empty() || payload.access_password != *expected {
        return Err(Forbidden);
    }

    let email = validate_email(&payload.email)?;
    validate_password(&payload.password)?;

    let outcome = state.baas.sign_up(&email, &payload.password).await?;
    info!("New signup for {email}");

    Ok((StatusCode::CREATED, Json(outcome)))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

pub async fn login_handler(
    AxumState(state): AppState,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = validate_email(&payload.email)?;
    let session = state
        .baas
        .sign_in(&email, &payload.password)
        .await
        .map_err(AppError::from_auth)?;

    Ok(Json(session))
}

#[derive(Deserialize)]
pub struct MagicLinkRequest {
    email: String,
}

pub async fn magic_link_handler(
    AxumState(state): AppState,
    Json(payload): Json<MagicLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = validate_email(&payload.email)?;
    let redirect_to = format!(
        "{}{}",
        state.config.variant.base_url(),
        Destination::Home.path()
    );

    state.baas.send_magic_link(&email, &redirect_to).await?;

    Ok(StatusCode::ACCEPTED)
}

pub async fn submit_testimonial_handler(
    AxumState(state): AppState,
    Json(payload): Json<NewTestimonial>,
) -> Result<impl IntoResponse, AppError> {
    let new = NewTestimonial {
        author: payload.author.trim().to_string(),
        quote: payload.quote.trim().to_string(),
        rating: payload.rating,
    };

    if new.author.is_empty() || new.quote.is_empty() {
        return Err(MalformedPayload("author and quote are required".to_string()));
    }

    if !(1..=5).contains(&new.rating) {
        return Err(MalformedPayload("rating must be between 1 and 5".to_string()));
    }

    let testimonial = state.baas.insert_testimonial(&new).await?;

    Ok((StatusCode::CREATED, Json(testimonial)))
}

#[derive(Deserialize)]
pub struct TestimonialQuery {
    status: Option<TestimonialStatus>,
}

pub async fn list_testimonials_handler(
    AxumState(state): AppState,
    _admin: Admin,
    Query(query): Query<TestimonialQuery>,
) -> Result<impl IntoResponse, AppError> {
    let testimonials = state.baas.list_testimonials(query.status).await?;

    Ok(Json(testimonials))
}

#[derive(Deserialize)]
pub struct StatusUpdate {
    status: TestimonialStatus,
}

pub async fn review_testimonial_handler(
    AxumState(state): AppState,
    Admin(admin): Admin,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state
        .baas
        .set_testimonial_status(&id, payload.status)
        .await?
        .ok_or_else(|| NotFound(format!("testimonial {id}")))?;

    info!(
        "Testimonial {id} marked {} by {}",
        payload.status.as_str(),
        admin.email.as_deref().unwrap_or(&admin.id)
    );

    Ok(Json(updated))
}

pub async fn list_orders_handler(
    AxumState(state): AppState,
    _admin: Admin,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.baas.list_orders().await?))
}

pub async fn checkout_options_handler() -> impl IntoResponse {
    Json(options())
}

#[derive(Deserialize)]
pub struct QuoteRequest {
    network: Network,
    token: Token,
    total_cents: u64,
}

pub async fn quote_handler(
    AxumState(state): AppState,
    Json(payload): Json<QuoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let amount = amount_in_base_units(payload.total_cents, payload.token, state.config.eth_usd_cents)?;
    let request = transfer_request(
        payload.network,
        payload.token,
        &state.config.merchant_wallet,
        amount,
    )?;

    Ok(Json(request))
}

#[derive(Deserialize)]
pub struct ConfirmRequest {
    network: Network,
    token: Token,
    wallet_chain_id: u64,
    tx_hash: String,
    total_cents: u64,
}

pub async fn confirm_handler(
    AxumState(state): AppState,
    SignedIn(user): SignedIn,
    Json(payload): Json<ConfirmRequest>,
) -> Result<impl IntoResponse, AppError> {
    ensure_network(payload.network, payload.wallet_chain_id)?;
    let tx_hash = validate_tx_hash(&payload.tx_hash)?;
    let amount = amount_in_base_units(payload.total_cents, payload.token, state.config.eth_usd_cents)?;

    let email = user
        .email
        .ok_or_else(|| MalformedPayload("account has no email".to_string()))?;

    let order = state
        .baas
        .insert_order(&NewOrder {
            email,
            network: payload.network,
            token: payload.token,
            amount: amount.to_string(),
            total_cents: payload.total_cents,
            tx_hash,
            receipt: ReceiptStatus::Pending,
        })
        .await?;

    info!(
        "Order {} recorded, {}",
        order.id,
        payload.network.explorer_tx_url(&order.tx_hash)
    );

    Ok((StatusCode::CREATED, Json(order)))
}
