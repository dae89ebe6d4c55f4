use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::modules::employees::application::RegisterEmployee;
use crate::modules::employees::domain::{EmployeeUpdate, Role, User};
use crate::server::AppState;
use crate::shared::errors::AppResult;

/// Account as listed to administrators. The password hash never leaves
/// the service.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub is_temporary_password: bool,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at.to_rfc3339(),
            username: user.username,
            name: user.name,
            role: user.role,
            is_temporary_password: user.is_temporary_password,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub is_temporary_password: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    #[serde(default)]
    pub is_temporary: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChangePasswordRequest {
    pub user_id: Option<i32>,
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: Option<String>,
    #[serde(default = "default_true")]
    pub is_temporary: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub role: Option<String>,
}

fn default_true() -> bool {
    true
}

fn parse_role(role: Option<&str>) -> AppResult<Option<Role>> {
    role.filter(|r| !r.trim().is_empty())
        .map(str::parse::<Role>)
        .transpose()
}

impl RegisterRequest {
    fn into_registration(self) -> AppResult<RegisterEmployee> {
        Ok(RegisterEmployee {
            role: parse_role(self.role.as_deref())?,
            username: self.username,
            password: self.password,
            name: self.name,
            is_temporary: self.is_temporary,
        })
    }
}

impl UpdateEmployeeRequest {
    fn into_update(self) -> AppResult<EmployeeUpdate> {
        Ok(EmployeeUpdate {
            role: parse_role(self.role.as_deref())?,
            name: self.name,
        })
    }
}

/// `/api/auth`
pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/change-password", post(change_password))
        .route("/users", get(list_users))
        .route("/users/:id", put(update_user).delete(delete_user))
        .route("/users/:id/reset-password", post(reset_password))
}

/// `/api/employees`
pub fn employees_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_employee))
        .route("/:id", put(update_employee).delete(delete_employee))
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .employees
        .login(body.username.as_deref(), body.password.as_deref())
        .await?;
    Ok(Json(LoginResponse {
        id: user.id,
        username: user.username,
        name: user.name,
        role: user.role,
        is_temporary_password: user.is_temporary_password,
    }))
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let user = state.employees.register(body.into_registration()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "user": UserResponse::from(user),
        })),
    ))
}

async fn change_password(
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> AppResult<impl IntoResponse> {
    state
        .employees
        .change_password(
            body.user_id,
            body.old_password.as_deref(),
            body.new_password.as_deref(),
        )
        .await?;
    Ok(Json(json!({ "message": "Password changed successfully" })))
}

async fn reset_password(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ResetPasswordRequest>,
) -> AppResult<impl IntoResponse> {
    let user = state
        .employees
        .reset_password(id, body.new_password.as_deref(), body.is_temporary)
        .await?;
    Ok(Json(json!({
        "message": "Password reset successfully",
        "user": UserResponse::from(user),
    })))
}

async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.employees.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateEmployeeRequest>,
) -> AppResult<impl IntoResponse> {
    // Only the role is editable through the auth surface.
    let update = EmployeeUpdate {
        role: parse_role(body.role.as_deref())?,
        name: None,
    };
    let user = state.employees.update_employee(id, update).await?;
    Ok(Json(json!({
        "message": "User updated",
        "user": UserResponse::from(user),
    })))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    state.employees.delete_employee(id).await?;
    Ok(Json(json!({ "message": "User deleted" })))
}

async fn create_employee(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let mut registration = body.into_registration()?;
    registration.is_temporary = false;
    let employee = state.employees.register(registration).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Employee created",
            "employee": UserResponse::from(employee),
        })),
    ))
}

async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateEmployeeRequest>,
) -> AppResult<impl IntoResponse> {
    let employee = state
        .employees
        .update_employee(id, body.into_update()?)
        .await?;
    Ok(Json(json!({
        "message": "Employee updated",
        "employee": UserResponse::from(employee),
    })))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    state.employees.delete_employee(id).await?;
    Ok(Json(json!({ "message": "Employee deleted" })))
}
