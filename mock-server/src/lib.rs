use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    pub id: u64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cpf")]
    pub tax_id: String,
    pub email: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
}

#[derive(Deserialize)]
pub struct CustomerInput {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cpf")]
    pub tax_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telefone", default)]
    pub phone: Option<String>,
}

impl CustomerInput {
    fn into_customer(self, id: u64) -> Customer {
        Customer {
            id,
            name: self.name,
            tax_id: self.tax_id,
            email: self.email,
            phone: self.phone,
        }
    }
}

/// Records keyed by id so listings come back in creation order.
#[derive(Default)]
pub struct Store {
    next_id: u64,
    customers: BTreeMap<u64, Customer>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/clientes", get(list_customers).post(create_customer))
        .route(
            "/clientes/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_customers(State(db): State<Db>) -> Json<Vec<Customer>> {
    let store = db.read().await;
    Json(store.customers.values().cloned().collect())
}

async fn create_customer(
    State(db): State<Db>,
    Json(input): Json<CustomerInput>,
) -> (StatusCode, Json<Customer>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let customer = input.into_customer(store.next_id);
    store.customers.insert(customer.id, customer.clone());
    info!(id = customer.id, "customer created");
    (StatusCode::CREATED, Json(customer))
}

async fn get_customer(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Customer>, StatusCode> {
    let store = db.read().await;
    store.customers.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// PUT replaces the whole record; only the id survives.
async fn update_customer(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<CustomerInput>,
) -> Result<Json<Customer>, StatusCode> {
    let mut store = db.write().await;
    let customer = store.customers.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *customer = input.into_customer(id);
    info!(id, "customer replaced");
    Ok(Json(customer.clone()))
}

async fn delete_customer(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .customers
        .remove(&id)
        .map(|_| {
            info!(id, "customer deleted");
            StatusCode::NO_CONTENT
        })
        .ok_or(StatusCode::NOT_FOUND)
}
