//! User resource handlers.
//!
//! These only ever see requests that passed the integrity middleware.

use crate::{
    error::ApiError,
    models::user::{User, UserPath, UserRequest},
    services::UserStore,
};
use actix_web::{Error, Result, web};
use paperclip::actix::{CreatedJson, NoContent, api_v2_operation};

/// Create a user
#[api_v2_operation(
    summary = "Create User",
    description = "Validates and stores a new user.",
    tags("Users"),
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Missing, stale, or invalid request signature")
    )
)]
pub async fn create_user(
    store: web::Data<UserStore>,
    payload: web::Json<UserRequest>,
) -> Result<CreatedJson<User>, Error> {
    let request = payload.into_inner();
    request.validate()?;

    let user = store.create(request)?;
    tracing::info!(user_id = user.id, "User created");
    Ok(CreatedJson(user))
}

/// List all users
#[api_v2_operation(
    summary = "List Users",
    description = "Returns every stored user ordered by id.",
    tags("Users"),
    responses(
        (status = 200, description = "All users"),
        (status = 403, description = "Missing, stale, or invalid request signature")
    )
)]
pub async fn list_users(store: web::Data<UserStore>) -> Result<web::Json<Vec<User>>, Error> {
    Ok(web::Json(store.find_all()))
}

/// Fetch one user
#[api_v2_operation(
    summary = "Get User",
    description = "Returns the user with the given id.",
    tags("Users"),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "No such user"),
        (status = 403, description = "Missing, stale, or invalid request signature")
    )
)]
pub async fn get_user(
    store: web::Data<UserStore>,
    path: web::Path<UserPath>,
) -> Result<web::Json<User>, Error> {
    Ok(web::Json(store.find_one(path.id)?))
}

/// Replace a user
#[api_v2_operation(
    summary = "Update User",
    description = "Validates and replaces the user with the given id.",
    tags("Users"),
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "No such user"),
        (status = 403, description = "Missing, stale, or invalid request signature")
    )
)]
pub async fn update_user(
    store: web::Data<UserStore>,
    path: web::Path<UserPath>,
    payload: web::Json<UserRequest>,
) -> Result<web::Json<User>, Error> {
    let request = payload.into_inner();
    request.validate()?;

    let user = store.update(path.id, request)?;
    tracing::info!(user_id = user.id, "User updated");
    Ok(web::Json(user))
}

/// Delete a user
#[api_v2_operation(
    summary = "Delete User",
    description = "Removes the user with the given id.",
    tags("Users"),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "No such user"),
        (status = 403, description = "Missing, stale, or invalid request signature")
    )
)]
pub async fn delete_user(
    store: web::Data<UserStore>,
    path: web::Path<UserPath>,
) -> Result<NoContent, Error> {
    let user = store.remove(path.id)?;
    tracing::info!(user_id = user.id, "User deleted");
    Ok(NoContent)
}

/// Turn body and path extraction failures into JSON 400 responses.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> Error {
    ApiError::Validation(format!("Invalid request body: {err}")).into()
}

pub fn path_error_handler(
    err: actix_web::error::PathError,
    _req: &actix_web::HttpRequest,
) -> Error {
    ApiError::Validation(format!("Invalid path parameter: {err}")).into()
}
