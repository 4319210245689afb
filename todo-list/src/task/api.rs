use crate::entities::sea_orm_active_enums::{TaskPriority, TaskStatus};
use crate::entities::task;
use crate::task::dto::{TodoDto, date_only};
use crate::task::unit_of_work::UnitOfWork;
use crate::web::error::{ApiError, ErrorResponse};
use crate::web::extract::ValidatedJson;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderName, StatusCode, header};
use axum::response::Json;
use axum::routing::{delete, get, post, put};
use axum::Router;
use axum_extra::extract::WithRejection;
use sea_orm::{DatabaseConnection, DbErr};
use serde::Deserialize;
use std::sync::Arc;

/// Path prefix every to-do route is mounted under.
pub const API_PREFIX: &str = "/api/TODOs";

type ApiResult<T> = Result<T, ApiError>;

#[derive(Clone, Debug)]
pub struct TodoState {
    pub db: Arc<DatabaseConnection>,
}

impl TodoState {
    fn unit_of_work(&self) -> UnitOfWork {
        UnitOfWork::new(self.db.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct DueDateQuery {
    due_date: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskPriorityQuery {
    #[serde(rename = "taskPriority")]
    task_priority: String,
}

#[derive(Debug, Deserialize)]
pub struct PriorityQuery {
    priority: String,
}

fn to_dtos(tasks: Vec<task::Model>) -> Vec<TodoDto> {
    tasks.into_iter().map(TodoDto::from).collect()
}

/// Maps a filter result to 200, or 404 when nothing matched.
fn non_empty(tasks: Vec<task::Model>, message: &str) -> ApiResult<Json<Vec<TodoDto>>> {
    if tasks.is_empty() {
        return Err(ApiError::NotFound(message.to_string()));
    }
    Ok(Json(to_dtos(tasks)))
}

fn ensure_valid_id(id: i32) -> ApiResult<()> {
    if id <= 0 {
        return Err(ApiError::BadRequest("Invalid task ID.".to_string()));
    }
    Ok(())
}

/// Reads the completion segment; `true`/`false` in any letter case.
fn parse_completed(raw: &str) -> ApiResult<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ApiError::BadRequest(format!(
            "'{raw}' is not a valid completion flag, expected true or false"
        )))
    }
}

fn parse_priority(raw: &str) -> ApiResult<TaskPriority> {
    raw.parse::<TaskPriority>()
        .map_err(|err| ApiError::BadRequest(err.to_string()))
}

/// Loads the task a mutating request targets: 400 for a bad id, 404 when absent.
async fn load_task(unit: &UnitOfWork, id: i32) -> ApiResult<task::Model> {
    ensure_valid_id(id)?;
    unit.tasks()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Task with ID {id} not found.")))
}

/// Stages the mutated task, commits once and returns its wire form.
async fn save_task(unit: &mut UnitOfWork, task: task::Model) -> ApiResult<Json<TodoDto>> {
    unit.tasks_mut().update(task.clone());
    unit.save().await?;
    Ok(Json(TodoDto::from(task)))
}

/// Handler for GET /api/TODOs/Todos - Returns every task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/TODOs/Todos",
    summary = "Display all Todos",
    description = "Get All Todos From Database",
    responses(
        (status = 200, description = "Successfully retrieved Todos", body = Vec<TodoDto>),
        (status = 404, description = "No Todos found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn get_all_todos_handler(
    State(state): State<Arc<TodoState>>,
) -> ApiResult<Json<Vec<TodoDto>>> {
    let unit = state.unit_of_work();
    let tasks = unit.tasks().get_all().await?;
    non_empty(tasks, "No Todos found")
}

/// Handler for GET /api/TODOs/Todos/{id} - Returns a single task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/TODOs/Todos/{id}",
    summary = "Get todo by ID",
    description = "Fetches a task using the task ID.",
    params(("id" = i32, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Successfully retrieved task", body = TodoDto),
        (status = 404, description = "Todo not found", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn get_todo_by_id_handler(
    State(state): State<Arc<TodoState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> ApiResult<Json<TodoDto>> {
    let unit = state.unit_of_work();
    let task = unit
        .tasks()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No Todos With This ID ={id} is Found")))?;
    Ok(Json(TodoDto::from(task)))
}

/// Handler for GET /api/TODOs/tasks/{completed} - Filters by completion status.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/TODOs/tasks/{completed}",
    summary = "Retrieve tasks by their completion status",
    description = "Fetches tasks based on whether they are completed or not. The `completed` parameter indicates whether to retrieve completed or incomplete tasks.",
    params(("completed" = bool, Path, description = "true for completed tasks, false for incomplete ones")),
    responses(
        (status = 200, description = "Successfully retrieved tasks", body = Vec<TodoDto>),
        (status = 404, description = "No tasks found for the given completion status", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn get_todos_by_status_handler(
    State(state): State<Arc<TodoState>>,
    WithRejection(Path(completed), _): WithRejection<Path<String>, ApiError>,
) -> ApiResult<Json<Vec<TodoDto>>> {
    let completed = parse_completed(&completed)?;
    let unit = state.unit_of_work();
    let tasks = unit.search().get_todos_by_status(completed).await?;
    let message = if completed {
        "No Completed Tasks"
    } else {
        "No InCompleted Tasks"
    };
    non_empty(tasks, message)
}

/// Handler for GET /api/TODOs/TodoByDueDate - Filters by exact due date.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/TODOs/TodoByDueDate",
    summary = "Get Todos by their DueDate",
    description = "Fetches todos due on the given date. Any time of day in the parameter is ignored.",
    params(("due_date" = String, Query, description = "Date as YYYY-MM-DD, or a date-time", example = "2024-01-10")),
    responses(
        (status = 200, description = "Successfully retrieved todos", body = Vec<TodoDto>),
        (status = 400, description = "Unparsable date", body = ErrorResponse),
        (status = 404, description = "No todo found for the given due date", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn get_todos_by_due_date_handler(
    State(state): State<Arc<TodoState>>,
    WithRejection(Query(query), _): WithRejection<Query<DueDateQuery>, ApiError>,
) -> ApiResult<Json<Vec<TodoDto>>> {
    let due_date = date_only::parse(&query.due_date).ok_or_else(|| {
        ApiError::BadRequest(format!("'{}' is not a valid date", query.due_date))
    })?;
    let unit = state.unit_of_work();
    let tasks = unit.search().get_todos_by_due_date(due_date).await?;
    non_empty(tasks, &format!("No todo found due on {due_date}"))
}

/// Handler for GET /api/TODOs/tasksByPriority - Filters by priority.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/TODOs/tasksByPriority",
    summary = "Retrieve tasks by priority",
    description = "Fetches tasks based on their priority level. The `taskPriority` parameter indicates the level of priority to filter tasks.",
    params(("taskPriority" = String, Query, description = "Low, Medium or High", example = "High")),
    responses(
        (status = 200, description = "Successfully retrieved tasks by priority", body = Vec<TodoDto>),
        (status = 400, description = "Unknown priority", body = ErrorResponse),
        (status = 404, description = "No tasks found with the specified priority", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn get_todos_by_priority_handler(
    State(state): State<Arc<TodoState>>,
    WithRejection(Query(query), _): WithRejection<Query<TaskPriorityQuery>, ApiError>,
) -> ApiResult<Json<Vec<TodoDto>>> {
    let priority = parse_priority(&query.task_priority)?;
    let unit = state.unit_of_work();
    let tasks = unit.search().get_todos_by_priority(priority).await?;
    non_empty(tasks, &format!("No tasks found with priority {priority}"))
}

/// Handler for POST /api/TODOs/AddTodo - Creates a task.
#[tracing::instrument(skip(state, todo), fields(title = %todo.title))]
#[utoipa::path(
    post,
    path = "/api/TODOs/AddTodo",
    summary = "Add a new Todo",
    description = "Creates a New Todo and add it to database. Status defaults to InCompleted and priority to Low when omitted.",
    request_body = TodoDto,
    responses(
        (status = 201, description = "Todo successfully created", body = TodoDto,
            headers(("location" = String, description = "URL of the created todo"))),
        (status = 400, description = "Invalid todo data", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn create_todo_handler(
    State(state): State<Arc<TodoState>>,
    ValidatedJson(todo): ValidatedJson<TodoDto>,
) -> ApiResult<(StatusCode, [(HeaderName, String); 1], Json<TodoDto>)> {
    let mut unit = state.unit_of_work();
    unit.tasks_mut().add(todo.into_active_model()?);
    unit.save().await?;

    let created = unit
        .tasks()
        .inserted()
        .first()
        .cloned()
        .ok_or(DbErr::RecordNotInserted)?;
    tracing::info!("Created task {}", created.id);

    let location = format!("{API_PREFIX}/Todos/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(TodoDto::from(created)),
    ))
}

/// Handler for PUT /api/TODOs/{id}/Complete - Marks a task as completed.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/api/TODOs/{id}/Complete",
    summary = "Mark todo as completed",
    description = "Marks a todo as completed and update it in database.",
    params(("id" = i32, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Successfully marked the todo as completed", body = TodoDto),
        (status = 400, description = "Invalid todo ID", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn mark_complete_handler(
    State(state): State<Arc<TodoState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> ApiResult<Json<TodoDto>> {
    set_status(&state, id, TaskStatus::Completed).await
}

/// Handler for PUT /api/TODOs/{id}/InComplete - Marks a task as incomplete.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/api/TODOs/{id}/InComplete",
    summary = "Mark task as incomplete",
    description = "Marks a task as incomplete using the specified task ID.",
    params(("id" = i32, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Successfully marked the task as incomplete", body = TodoDto),
        (status = 400, description = "Invalid task ID", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn mark_incomplete_handler(
    State(state): State<Arc<TodoState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> ApiResult<Json<TodoDto>> {
    set_status(&state, id, TaskStatus::InCompleted).await
}

async fn set_status(state: &TodoState, id: i32, status: TaskStatus) -> ApiResult<Json<TodoDto>> {
    let mut unit = state.unit_of_work();
    let mut task = load_task(&unit, id).await?;
    task.status = status;
    save_task(&mut unit, task).await
}

/// Handler for PUT /api/TODOs/EditTodo/{id} - Overwrites a task's details.
#[tracing::instrument(skip(state, todo), fields(title = %todo.title))]
#[utoipa::path(
    put,
    path = "/api/TODOs/EditTodo/{id}",
    summary = "Edit Todo Details",
    description = "Updates an existing task with the new details. Status and priority are kept when omitted.",
    params(("id" = i32, Path, description = "Task identifier")),
    request_body = TodoDto,
    responses(
        (status = 200, description = "Todo successfully updated", body = TodoDto),
        (status = 400, description = "Invalid todo ID or todo data", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn edit_todo_handler(
    State(state): State<Arc<TodoState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    ValidatedJson(todo): ValidatedJson<TodoDto>,
) -> ApiResult<Json<TodoDto>> {
    let mut unit = state.unit_of_work();
    let mut task = load_task(&unit, id).await?;
    todo.apply_to(&mut task)?;
    save_task(&mut unit, task).await
}

/// Handler for PUT /api/TODOs/{id}/Priority - Changes a task's priority.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/api/TODOs/{id}/Priority",
    summary = "Update task priority",
    description = "Updates the priority of the task with the specified ID.",
    params(
        ("id" = i32, Path, description = "Task identifier"),
        ("priority" = String, Query, description = "Low, Medium or High", example = "High")
    ),
    responses(
        (status = 200, description = "Successfully updated the task priority", body = TodoDto),
        (status = 400, description = "Invalid task ID or priority", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn update_priority_handler(
    State(state): State<Arc<TodoState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Query(query), _): WithRejection<Query<PriorityQuery>, ApiError>,
) -> ApiResult<Json<TodoDto>> {
    let priority = parse_priority(&query.priority)?;
    let mut unit = state.unit_of_work();
    let mut task = load_task(&unit, id).await?;
    task.priority = priority;
    save_task(&mut unit, task).await
}

/// Handler for DELETE /api/TODOs/DeleteTodo/{id} - Deletes a task and returns the rest.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/TODOs/DeleteTodo/{id}",
    summary = "Delete a todo",
    description = "Deletes a todo using the todo ID and returns the remaining todos.",
    params(("id" = i32, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Todo successfully deleted", body = Vec<TodoDto>),
        (status = 400, description = "Invalid todo ID", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn delete_todo_handler(
    State(state): State<Arc<TodoState>>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> ApiResult<Json<Vec<TodoDto>>> {
    let mut unit = state.unit_of_work();
    load_task(&unit, id).await?;
    if !unit.tasks_mut().delete(id).await? {
        return Err(ApiError::NotFound(format!("Task with ID {id} not found.")));
    }
    unit.save().await?;

    let remaining = unit.tasks().get_all().await?;
    Ok(Json(to_dtos(remaining)))
}

/// Creates and returns the to-do API router, mounted under [`API_PREFIX`].
pub fn create_todo_router(state: TodoState) -> Router {
    let routes = Router::new()
        .route("/Todos", get(get_all_todos_handler))
        .route("/Todos/{id}", get(get_todo_by_id_handler))
        .route("/tasks/{completed}", get(get_todos_by_status_handler))
        .route("/TodoByDueDate", get(get_todos_by_due_date_handler))
        .route("/tasksByPriority", get(get_todos_by_priority_handler))
        .route("/AddTodo", post(create_todo_handler))
        .route("/{id}/Complete", put(mark_complete_handler))
        .route("/{id}/InComplete", put(mark_incomplete_handler))
        .route("/EditTodo/{id}", put(edit_todo_handler))
        .route("/{id}/Priority", put(update_priority_handler))
        .route("/DeleteTodo/{id}", delete(delete_todo_handler))
        .with_state(Arc::new(state));
    Router::new().nest(API_PREFIX, routes)
}
