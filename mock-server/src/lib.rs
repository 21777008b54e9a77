use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub name: String,
    pub info: String,
    pub is_important: bool,
    pub is_completed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub name: String,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub is_important: bool,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    pub name: Option<String>,
    pub info: Option<String>,
    pub is_important: Option<bool>,
    pub is_completed: Option<bool>,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    tasks: BTreeMap<u64, Task>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", patch(update_task).delete(delete_task))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_tasks(State(db): State<Db>) -> Json<Vec<Task>> {
    let store = db.read().await;
    Json(store.tasks.values().cloned().collect())
}

async fn create_task(
    State(db): State<Db>,
    Json(input): Json<CreateTask>,
) -> Result<(StatusCode, Json<Task>), StatusCode> {
    if input.name.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let mut store = db.write().await;
    store.next_id += 1;
    let task = Task {
        id: store.next_id,
        name: input.name,
        info: input.info,
        is_important: input.is_important,
        is_completed: input.is_completed,
    };
    store.tasks.insert(task.id, task.clone());
    debug!(id = task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTask>,
) -> Result<Json<Task>, StatusCode> {
    if input.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let mut store = db.write().await;
    let task = store.tasks.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        task.name = name;
    }
    if let Some(info) = input.info {
        task.info = info;
    }
    if let Some(is_important) = input.is_important {
        task.is_important = is_important;
    }
    if let Some(is_completed) = input.is_completed {
        task.is_completed = is_completed;
    }
    debug!(id, "task updated");
    Ok(Json(task.clone()))
}

async fn delete_task(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store.tasks.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    debug!(id, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}
