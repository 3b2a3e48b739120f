use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
    routing::any,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

pub const APP_ID_HEADER: &str = "x-omeda-appid";
pub const INPUT_ID_HEADER: &str = "x-omeda-inputid";

/// Id of the customer every fresh store starts with.
pub const SEEDED_CUSTOMER_ID: u64 = 1001;

#[derive(Debug)]
pub struct Store {
    customers: BTreeMap<u64, Value>,
    next_id: u64,
}

impl Default for Store {
    fn default() -> Self {
        let mut customers = BTreeMap::new();
        customers.insert(
            SEEDED_CUSTOMER_ID,
            json!({
                "Id": SEEDED_CUSTOMER_ID,
                "FirstName": "Ada",
                "LastName": "Lovelace",
                "Emails": [{"EmailAddress": "ada@example.com"}],
            }),
        );
        Self {
            customers,
            next_id: SEEDED_CUSTOMER_ID + 1,
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

type Reply = (StatusCode, Json<Value>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/webservices/rest/{scope}/{name}/{*rest}", any(dispatch))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn error(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({"Errors": [{"Error": message}]})))
}

async fn dispatch(
    State(db): State<Db>,
    method: Method,
    Path((scope, name, rest)): Path<(String, String, String)>,
    headers: HeaderMap,
    body: String,
) -> Reply {
    debug!(%method, %scope, %name, path = %rest, "mock request");

    if scope != "brand" && scope != "client" {
        return error(StatusCode::NOT_FOUND, "unknown scope");
    }
    if !headers.contains_key(APP_ID_HEADER) {
        return error(StatusCode::FORBIDDEN, "missing app id");
    }
    let modifying = method == Method::POST || method == Method::PUT || method == Method::DELETE;
    if modifying && !headers.contains_key(INPUT_ID_HEADER) {
        return error(StatusCode::FORBIDDEN, "missing input id");
    }

    let segments: Vec<&str> = rest.split('/').collect();
    match segments.as_slice() {
        ["customer", id, "*"] if method == Method::GET => lookup_customer(&db, id).await,
        ["storecustomerandorder", "*"] if method == Method::POST => {
            store_customer(&db, &body).await
        }
        _ => echo(&method, &scope, &name, &rest, &body),
    }
}

async fn lookup_customer(db: &Db, id: &str) -> Reply {
    let Ok(id) = id.parse::<u64>() else {
        return error(StatusCode::BAD_REQUEST, "customer id must be numeric");
    };
    match db.read().await.customers.get(&id) {
        Some(customer) => (StatusCode::OK, Json(customer.clone())),
        None => error(StatusCode::NOT_FOUND, "customer not found"),
    }
}

async fn store_customer(db: &Db, body: &str) -> Reply {
    let Ok(Value::Object(mut customer)) = serde_json::from_str::<Value>(body) else {
        return error(StatusCode::BAD_REQUEST, "body must be a JSON object");
    };
    let mut store = db.write().await;
    let id = store.next_id;
    store.next_id += 1;
    customer.insert("Id".to_string(), json!(id));
    store.customers.insert(id, Value::Object(customer));
    (
        StatusCode::OK,
        Json(json!({"ResponseInfo": [{"TransactionId": id, "CustomerId": id}]})),
    )
}

/// Reflect the request back, decoding the body as JSON when possible.
fn echo(method: &Method, scope: &str, name: &str, rest: &str, body: &str) -> Reply {
    (
        StatusCode::OK,
        Json(json!({
            "method": method.as_str(),
            "scope": scope,
            "name": name,
            "path": format!("/{rest}"),
            "body": decode_body(body),
        })),
    )
}

fn decode_body(body: &str) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
