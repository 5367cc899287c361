//! Helpers shared by the HTTP tests

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use order_server::db::repository::{category, product, staff};
use order_server::services::build_app;
use order_server::{Config, ServerState};
use shared::models::{CategoryCreate, ProductCreate, StaffCreate, StaffRole};

pub const ADMIN_CPF: &str = "11111111111";
pub const ADMIN_PASSWORD: &str = "admin-secret";
pub const COOK_CPF: &str = "22222222222";
pub const COOK_PASSWORD: &str = "cozinha-secret";
pub const ATTENDANT_CPF: &str = "33333333333";
pub const ATTENDANT_PASSWORD: &str = "atendente-secret";

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    /// In-memory server with one account per role
    pub async fn new() -> Self {
        Self::with_config(Config::for_tests()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let state = ServerState::for_tests(config).await.unwrap();
        for (name, cpf, password, role) in [
            ("Admin", ADMIN_CPF, ADMIN_PASSWORD, StaffRole::Admin),
            ("Cozinha", COOK_CPF, COOK_PASSWORD, StaffRole::Cozinha),
            ("Atendente", ATTENDANT_CPF, ATTENDANT_PASSWORD, StaffRole::Atendente),
        ] {
            staff::create(
                &state.pool,
                StaffCreate {
                    name: name.into(),
                    national_id: cpf.into(),
                    phone: "71900000000".into(),
                    password: password.into(),
                    role,
                },
                0,
            )
            .await
            .unwrap();
        }
        let app = build_app(state.clone()).unwrap();
        Self { app, state }
    }

    /// Category with the given `(name, price)` products; returns product ids
    pub async fn seed_menu(&self, products: &[(&str, f64)]) -> Vec<i64> {
        let cat = category::create(
            &self.state.pool,
            CategoryCreate {
                name: "Marmitas".into(),
                description: None,
                image: None,
                display_price: None,
                is_active: None,
            },
        )
        .await
        .unwrap();

        let mut ids = Vec::new();
        for (name, price) in products {
            let p = product::create(
                &self.state.pool,
                ProductCreate {
                    category_id: cat.id,
                    name: (*name).into(),
                    price: *price,
                    image: None,
                    description: None,
                    garnishes: vec![],
                    is_active: None,
                },
            )
            .await
            .unwrap();
            ids.push(p.id);
        }
        ids
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Log in as staff and return the `jwt=...` cookie pair
    pub async fn login(&self, cpf: &str, password: &str) -> String {
        let response = self
            .send(
                Method::POST,
                "/auth/login",
                None,
                Some(serde_json::json!({ "nome": cpf, "telefone": password })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        let set_cookie = response
            .headers
            .get(header::SET_COOKIE)
            .expect("staff login sets the session cookie")
            .to_str()
            .unwrap()
            .to_string();
        set_cookie.split(';').next().unwrap().to_string()
    }
}
