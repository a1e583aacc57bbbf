//! # Backend-as-a-Service
//!
//! Auth and row storage live in a hosted Postgres with a REST front (Supabase style).
//!
//! ## Tables
//! - `testimonials`: id, author, quote, rating, status (`pending|approved|rejected`), created_at
//! - `orders`: id, email, network, token, amount, total_cents, tx_hash, receipt, created_at
//!
//! ## Keys
//! - Anon key: auth endpoints, same key the browser would use
//! - Service key: table reads/writes, bypasses row-level security so it never leaves the server
//!
//! ## Admins
//! - Any signed-in user whose `app_metadata.role` is `admin`
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::warn;

use crate::checkout::{Network, ReceiptStatus, Token};

#[derive(Error, Debug)]
pub enum BaasError {
    #[error("Backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected backend response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestimonialStatus {
    Pending,
    Approved,
    Rejected,
}

impl TestimonialStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TestimonialStatus::Pending => "pending",
            TestimonialStatus::Approved => "approved",
            TestimonialStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub app_metadata: AppMetadata,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.app_metadata.role.as_deref() == Some("admin")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SignUpOutcome {
    SignedIn { session: Session },
    ConfirmEmail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTestimonial {
    pub author: String,
    pub quote: String,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub author: String,
    pub quote: String,
    pub rating: u8,
    pub status: TestimonialStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub email: String,
    pub network: Network,
    pub token: Token,
    pub amount: String,
    pub total_cents: u64,
    pub tx_hash: String,
    pub receipt: ReceiptStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub email: String,
    pub network: Network,
    pub token: Token,
    pub amount: String,
    pub total_cents: u64,
    pub tx_hash: String,
    pub receipt: ReceiptStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait Baas: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, BaasError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BaasError>;

    async fn send_magic_link(&self, email: &str, redirect_to: &str) -> Result<(), BaasError>;

    async fn user_for_token(&self, access_token: &str) -> Result<User, BaasError>;

    async fn list_testimonials(
        &self,
        status: Option<TestimonialStatus>,
    ) -> Result<Vec<Testimonial>, BaasError>;

    async fn insert_testimonial(&self, new: &NewTestimonial) -> Result<Testimonial, BaasError>;

    async fn set_testimonial_status(
        &self,
        id: &str,
        status: TestimonialStatus,
    ) -> Result<Option<Testimonial>, BaasError>;

    async fn list_orders(&self) -> Result<Vec<Order>, BaasError>;

    async fn insert_order(&self, order: &NewOrder) -> Result<Order, BaasError>;
}

pub struct HttpBaas {
    client: Client,
    base_url: String,
    anon_key: String,
    service_key: String,
}

impl HttpBaas {
    pub fn new(base_url: &str, anon_key: &str, service_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            service_key: service_key.to_string(),
        }
    }

    fn auth(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/auth/v1/{path}", self.base_url))
            .header("apikey", &self.anon_key)
    }

    fn table(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/{table}", self.base_url))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }
}

async fn check(response: Response) -> Result<Response, BaasError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| {
            ["msg", "error_description", "message", "error"]
                .iter()
                .find_map(|key| v.get(key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or(body);

    warn!("Backend returned {status}: {message}");

    Err(BaasError::Rejected {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BaasError> {
    let body = check(response).await?.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| BaasError::Decode(e.to_string()))
}

async fn first<T: DeserializeOwned>(response: Response) -> Result<Option<T>, BaasError> {
    let rows: Vec<T> = decode(response).await?;
    Ok(rows.into_iter().next())
}

#[async_trait]
impl Baas for HttpBaas {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, BaasError> {
        let response = self
            .auth(Method::POST, "signup")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let body: Value = decode(response).await?;

        // no session until the address is confirmed
        if body.get("access_token").is_none() {
            return Ok(SignUpOutcome::ConfirmEmail);
        }

        let session = serde_json::from_value(body).map_err(|e| BaasError::Decode(e.to_string()))?;
        Ok(SignUpOutcome::SignedIn { session })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BaasError> {
        let response = self
            .auth(Method::POST, "token")
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        decode(response).await
    }

    async fn send_magic_link(&self, email: &str, redirect_to: &str) -> Result<(), BaasError> {
        let response = self
            .auth(Method::POST, "otp")
            .query(&[("redirect_to", redirect_to)])
            .json(&json!({ "email": email, "create_user": false }))
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    async fn user_for_token(&self, access_token: &str) -> Result<User, BaasError> {
        let response = self
            .auth(Method::GET, "user")
            .bearer_auth(access_token)
            .send()
            .await?;

        decode(response).await
    }

    async fn list_testimonials(
        &self,
        status: Option<TestimonialStatus>,
    ) -> Result<Vec<Testimonial>, BaasError> {
        let mut query = vec![
            ("select", "*".to_string()),
            ("order", "created_at.desc".to_string()),
        ];
        if let Some(status) = status {
            query.push(("status", format!("eq.{}", status.as_str())));
        }

        let response = self
            .table(Method::GET, "testimonials")
            .query(&query)
            .send()
            .await?;

        decode(response).await
    }

    async fn insert_testimonial(&self, new: &NewTestimonial) -> Result<Testimonial, BaasError> {
        let response = self
            .table(Method::POST, "testimonials")
            .header("Prefer", "return=representation")
            .json(&json!({
                "author": new.author,
                "quote": new.quote,
                "rating": new.rating,
                "status": TestimonialStatus::Pending,
            }))
            .send()
            .await?;

        first(response)
            .await?
            .ok_or_else(|| BaasError::Decode("insert returned no rows".to_string()))
    }

    async fn set_testimonial_status(
        &self,
        id: &str,
        status: TestimonialStatus,
    ) -> Result<Option<Testimonial>, BaasError> {
        let response = self
            .table(Method::PATCH, "testimonials")
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{id}"))])
            .json(&json!({ "status": status }))
            .send()
            .await?;

        first(response).await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, BaasError> {
        let response = self
            .table(Method::GET, "orders")
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;

        decode(response).await
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<Order, BaasError> {
        let response = self
            .table(Method::POST, "orders")
            .header("Prefer", "return=representation")
            .json(order)
            .send()
            .await?;

        first(response)
            .await?
            .ok_or_else(|| BaasError::Decode("insert returned no rows".to_string()))
    }
}

impl BaasError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            BaasError::Rejected { status, .. } => StatusCode::from_u16(*status).ok(),
            BaasError::Transport(_) | BaasError::Decode(_) => None,
        }
    }
}
