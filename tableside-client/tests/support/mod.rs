//! In-process fake of the restaurant backend
//!
//! Serves every endpoint the client uses from a shared, inspectable state.
//! Orders are stored with plain `menuid` strings and populated from the menu
//! on the way out, like the real backend. Failures can be injected on
//! `PUT /api/orders`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use tableside_client::{ApiClient, OneshotHttpClient};

pub const STAFF_EMAIL: &str = "waiter@elitecafe.com";
pub const STAFF_TOKEN: &str = "tok-waiter";
pub const VALID_OTP: &str = "123456";

#[derive(Debug, Default)]
pub struct Backend {
    pub orders: Vec<Value>,
    pub tables: Vec<Value>,
    pub menus: Vec<Value>,
    pub categories: Vec<Value>,
    pub employees: Vec<Value>,
    /// token -> email
    pub tokens: HashMap<String, String>,
    /// "METHOD /path" for every request received
    pub calls: Vec<String>,
    pub order_posts: Vec<Value>,
    pub order_puts: Vec<Value>,
    pub last_order_query: Option<HashMap<String, String>>,
    /// Answer the next N `PUT /api/orders` with a bare 500
    pub fail_order_puts: u32,
    /// Refuse every `PUT /api/orders` with this message
    pub reject_order_puts: Option<String>,
    /// Issue OTP tokens that token verification then refuses
    pub unverifiable_tokens: bool,
    next_order: u32,
}

impl Backend {
    pub fn seeded() -> Self {
        let mut backend = Self {
            menus: vec![
                json!({"_id": "m1", "name": "Paneer Tikka", "price": 180.0, "categoryid": "c1", "status": "available", "isVegetarian": true}),
                json!({"_id": "m2", "name": "Masala Chai", "price": 40.0, "categoryid": "c2", "status": "available", "isVegetarian": true}),
                json!({"_id": "m3", "name": "Chicken Biryani", "price": 260.5, "categoryid": "c1", "status": "unavailable", "isVegetarian": false}),
            ],
            categories: vec![
                json!({"_id": "c1", "name": "Mains"}),
                json!({"_id": "c2", "name": "Beverages", "description": "Hot and cold"}),
            ],
            tables: vec![
                json!({"_id": "t1", "tableid": "t1", "name": "T1", "capacity": 2, "status": "available"}),
                json!({"_id": "t2", "tableid": "t2", "name": "T2", "capacity": 4, "status": "reserved"}),
                json!({"_id": "t2b", "tableid": "t2b", "name": "T2", "capacity": 6, "status": "available"}),
                json!({"_id": "t5", "tableid": "t5", "name": "T5", "status": "available"}),
            ],
            employees: vec![json!({"_id": "e1", "email": STAFF_EMAIL, "name": "Ravi", "role": "waiter"})],
            ..Default::default()
        };
        backend
            .tokens
            .insert(STAFF_TOKEN.to_string(), STAFF_EMAIL.to_string());
        backend.insert_order(json!({
            "tableid": "t5",
            "tableNumber": "T5",
            "customerName": "Meera",
            "customerPhone": "9811111111",
            "items": [{"menuid": "m1", "quantity": 2, "notes": "less spicy"}],
            "subtotal": 360.0,
            "tax": 18.0,
            "discount": 0.0,
            "totalAmount": 378.0,
            "status": "preparing",
            "orderDate": "2026-10-19T09:30:00Z"
        }));
        backend
    }

    /// Store an order, assigning `_id` and `orderid`; returns the `_id`
    pub fn insert_order(&mut self, mut order: Value) -> String {
        self.next_order += 1;
        let id = format!("o{}", self.next_order);
        order["_id"] = json!(id);
        order["orderid"] = json!(format!("ORD-{:03}", self.next_order));
        if order.get("status").is_none() {
            order["status"] = json!("pending");
        }
        if order.get("orderDate").is_none() {
            order["orderDate"] = json!("2026-10-19T12:00:00Z");
        }
        self.orders.push(order);
        id
    }

    pub fn order(&self, id: &str) -> Option<&Value> {
        self.orders.iter().find(|o| o["_id"] == id)
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| c.as_str() == call).count()
    }

    /// Copy of `order` with each `menuid` replaced by the menu entry
    fn populate(&self, order: &Value) -> Value {
        let mut order = order.clone();
        if let Some(items) = order["items"].as_array_mut() {
            for item in items {
                let id = item["menuid"].as_str().unwrap_or_default().to_string();
                if let Some(menu) = self.menus.iter().find(|m| m["_id"] == id.as_str()) {
                    item["menuid"] = json!({"_id": id, "name": menu["name"], "price": menu["price"]});
                }
            }
        }
        order
    }
}

pub type Shared = Arc<Mutex<Backend>>;

pub fn backend() -> Shared {
    Arc::new(Mutex::new(Backend::seeded()))
}

pub fn lock(state: &Shared) -> MutexGuard<'_, Backend> {
    state.lock().unwrap()
}

pub fn api(state: &Shared) -> Arc<ApiClient<OneshotHttpClient>> {
    Arc::new(ApiClient::new(OneshotHttpClient::new(router(state.clone()))))
}

pub fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/auth/send-otp", post(send_otp))
        .route("/api/auth/verify-otp", post(verify_otp))
        .route("/api/auth/verify", get(verify_token))
        .route("/api/auth/profile", get(get_profile).put(update_profile))
        .route("/api/tables", get(list_tables))
        .route("/api/tables/{id}/status", put(update_table_status))
        .route("/api/category", get(list_categories))
        .route("/api/menu", get(list_menu))
        .route(
            "/api/orders",
            get(list_orders).post(create_order).put(update_order),
        )
        .with_state(state)
}

fn refuse(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"success": false, "message": message}))).into_response()
}

fn ok(mut body: Value) -> Response {
    body["success"] = json!(true);
    Json(body).into_response()
}

fn record<'a>(state: &'a Shared, call: &str) -> MutexGuard<'a, Backend> {
    let mut backend = lock(state);
    backend.calls.push(call.to_string());
    backend
}

fn authorize(backend: &Backend, headers: &HeaderMap) -> Result<String, Response> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|token| backend.tokens.get(token).cloned())
        .ok_or_else(|| refuse(StatusCode::UNAUTHORIZED, "Invalid or expired token"))
}

// ========== Auth ==========

async fn send_otp(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let _backend = record(&state, "POST /api/auth/send-otp");
    match body["email"].as_str() {
        Some(email) if !email.is_empty() => ok(json!({"message": "OTP sent to your email"})),
        _ => refuse(StatusCode::BAD_REQUEST, "Email is required"),
    }
}

async fn verify_otp(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = record(&state, "POST /api/auth/verify-otp");
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if body["otp"] != VALID_OTP || !backend.employees.iter().any(|e| e["email"] == email.as_str()) {
        return refuse(StatusCode::BAD_REQUEST, "Invalid OTP");
    }
    let token = format!("tok-{}", email.split('@').next().unwrap_or_default());
    if !backend.unverifiable_tokens {
        backend.tokens.insert(token.clone(), email);
    }
    ok(json!({"token": token}))
}

async fn verify_token(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let backend = record(&state, "GET /api/auth/verify");
    let employee = query
        .get("token")
        .and_then(|t| backend.tokens.get(t))
        .and_then(|email| backend.employees.iter().find(|e| e["email"] == email.as_str()));
    match employee {
        Some(employee) => ok(json!({"data": employee})),
        None => refuse(StatusCode::UNAUTHORIZED, "Invalid or expired token"),
    }
}

async fn get_profile(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let backend = record(&state, "GET /api/auth/profile");
    if let Err(resp) = authorize(&backend, &headers) {
        return resp;
    }
    let email = query.get("email").cloned().unwrap_or_default();
    match backend.employees.iter().find(|e| e["email"] == email.as_str()) {
        Some(employee) => ok(json!({"data": employee})),
        None => refuse(StatusCode::NOT_FOUND, "Employee not found"),
    }
}

async fn update_profile(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = record(&state, "PUT /api/auth/profile");
    if let Err(resp) = authorize(&backend, &headers) {
        return resp;
    }
    let Some(employee) = backend
        .employees
        .iter_mut()
        .find(|e| e["email"] == body["email"])
    else {
        return refuse(StatusCode::NOT_FOUND, "Employee not found");
    };
    for field in ["name", "phone"] {
        if let Some(value) = body.get(field) {
            employee[field] = value.clone();
        }
    }
    ok(json!({"message": "Profile updated"}))
}

// ========== Tables & menu ==========

async fn list_tables(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let backend = record(&state, "GET /api/tables");
    if let Err(resp) = authorize(&backend, &headers) {
        return resp;
    }
    let tables: Vec<&Value> = backend
        .tables
        .iter()
        .filter(|t| query.get("status").is_none_or(|s| t["status"] == s.as_str()))
        .collect();
    ok(json!({"tables": tables}))
}

async fn update_table_status(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = record(&state, "PUT /api/tables/status");
    if let Err(resp) = authorize(&backend, &headers) {
        return resp;
    }
    match backend.tables.iter_mut().find(|t| t["tableid"] == id.as_str()) {
        Some(table) => {
            table["status"] = body["status"].clone();
            ok(json!({"message": "Table status updated"}))
        }
        None => refuse(StatusCode::NOT_FOUND, "Table not found"),
    }
}

async fn list_categories(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let backend = record(&state, "GET /api/category");
    if let Err(resp) = authorize(&backend, &headers) {
        return resp;
    }
    ok(json!({"categories": backend.categories}))
}

async fn list_menu(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let backend = record(&state, "GET /api/menu");
    if let Err(resp) = authorize(&backend, &headers) {
        return resp;
    }
    let search = query.get("search").map(|s| s.to_lowercase());
    let menus: Vec<&Value> = backend
        .menus
        .iter()
        .filter(|m| query.get("categoryid").is_none_or(|c| m["categoryid"] == c.as_str()))
        .filter(|m| query.get("status").is_none_or(|s| m["status"] == s.as_str()))
        .filter(|m| {
            search.as_ref().is_none_or(|s| {
                m["name"]
                    .as_str()
                    .is_some_and(|n| n.to_lowercase().contains(s))
            })
        })
        .collect();
    ok(json!({"menus": menus}))
}

// ========== Orders ==========

async fn list_orders(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut backend = record(&state, "GET /api/orders");
    if let Err(resp) = authorize(&backend, &headers) {
        return resp;
    }
    let orders: Vec<Value> = backend
        .orders
        .iter()
        .filter(|o| query.get("status").is_none_or(|s| o["status"] == s.as_str()))
        .filter(|o| {
            query.get("date").is_none_or(|d| {
                o["orderDate"]
                    .as_str()
                    .is_some_and(|date| date.starts_with(d.as_str()))
            })
        })
        .map(|o| backend.populate(o))
        .collect();
    backend.last_order_query = Some(query);
    ok(json!({"orders": orders}))
}

async fn create_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = record(&state, "POST /api/orders");
    if let Err(resp) = authorize(&backend, &headers) {
        return resp;
    }
    backend.order_posts.push(body.clone());

    let mut order = body;
    order["tax"] = json!(0.0);
    order["discount"] = json!(0.0);
    order["totalAmount"] = order["subtotal"].clone();
    let id = backend.insert_order(order);
    let created = backend.order(&id).map(|o| backend.populate(o));
    ok(json!({"message": "Order created", "order": created}))
}

async fn update_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = record(&state, "PUT /api/orders");
    if let Err(resp) = authorize(&backend, &headers) {
        return resp;
    }
    backend.order_puts.push(body.clone());

    if backend.fail_order_puts > 0 {
        backend.fail_order_puts -= 1;
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream unavailable").into_response();
    }
    if let Some(message) = backend.reject_order_puts.clone() {
        return refuse(StatusCode::OK, &message);
    }

    let Some(order) = backend
        .orders
        .iter_mut()
        .find(|o| o["orderid"] == body["orderid"])
    else {
        return refuse(StatusCode::NOT_FOUND, "Order not found");
    };
    for field in [
        "tableNumber",
        "customerName",
        "customerPhone",
        "items",
        "subtotal",
        "tax",
        "discount",
        "totalAmount",
        "status",
    ] {
        if let Some(value) = body.get(field) {
            order[field] = value.clone();
        }
    }
    ok(json!({"message": "Order updated"}))
}
