use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street_name: String,
    pub postal_code: String,
    pub apartment_number: Option<u32>,
    pub state: String,
    pub country: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub addresses: Vec<Address>,
}

/// Body of `POST` and `PUT`. Any `id` in the body is ignored.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub addresses: Vec<Address>,
}

impl EmployeeInput {
    fn into_employee(self, id: u64) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            addresses: self.addresses,
        }
    }
}

/// Rows keyed by id. Ids are handed out sequentially, so key order is
/// insertion order.
#[derive(Debug, Default)]
pub struct Table {
    next_id: u64,
    rows: BTreeMap<u64, Employee>,
}

impl Table {
    pub fn insert(&mut self, input: EmployeeInput) -> Employee {
        self.next_id += 1;
        let employee = input.into_employee(self.next_id);
        self.rows.insert(employee.id, employee.clone());
        employee
    }
}

pub type Db = Arc<RwLock<Table>>;

pub fn app() -> Router {
    app_with(Table::default())
}

/// Router over a pre-filled table.
pub fn app_with(table: Table) -> Router {
    let db: Db = Arc::new(RwLock::new(table));
    Router::new()
        .route("/employee", get(list_employees).post(create_employee))
        .route(
            "/employee/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_employees(State(db): State<Db>) -> Json<Vec<Employee>> {
    let table = db.read().await;
    Json(table.rows.values().cloned().collect())
}

async fn create_employee(
    State(db): State<Db>,
    Json(input): Json<EmployeeInput>,
) -> (StatusCode, Json<Employee>) {
    let employee = db.write().await.insert(input);
    info!(id = employee.id, "employee created");
    (StatusCode::CREATED, Json(employee))
}

async fn get_employee(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Employee>, StatusCode> {
    let table = db.read().await;
    table.rows.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_employee(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<EmployeeInput>,
) -> StatusCode {
    let mut table = db.write().await;
    match table.rows.get_mut(&id) {
        Some(row) => {
            *row = input.into_employee(id);
            info!(id, "employee updated");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn delete_employee(State(db): State<Db>, Path(id): Path<u64>) -> StatusCode {
    let mut table = db.write().await;
    match table.rows.remove(&id) {
        Some(_) => {
            info!(id, "employee deleted");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}
