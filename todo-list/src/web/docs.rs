use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::task::api;
use crate::task::dto::TodoDto;
use crate::web::error::ErrorResponse;

pub const SWAGGER_UI_PATH: &str = "/swagger-ui";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "ToDoList API - V1", version = "v1"),
    paths(
        api::get_all_todos_handler,
        api::get_todo_by_id_handler,
        api::get_todos_by_status_handler,
        api::get_todos_by_due_date_handler,
        api::get_todos_by_priority_handler,
        api::create_todo_handler,
        api::mark_complete_handler,
        api::mark_incomplete_handler,
        api::edit_todo_handler,
        api::update_priority_handler,
        api::delete_todo_handler,
    ),
    components(schemas(TodoDto, ErrorResponse)),
    tags((name = "Todos", description = "Create, read, update, delete and filter to-do items"))
)]
pub struct ApiDoc;

/// Interactive documentation served alongside the generated OpenAPI document.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}
