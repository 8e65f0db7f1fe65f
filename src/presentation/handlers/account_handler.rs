use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{patch, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        error::{DomainError, RepositoryError},
        models::account::Account,
        repositories::account_repository::{AccountChanges, AccountRepository},
        services::password_service::PasswordHasher,
    },
    usecase::{
        login_usecase::LoginUsecase, register_account_usecase::RegisterAccountUsecase,
        update_account_usecase::UpdateAccountUsecase,
    },
};

const TRACING_TARGET: &str = "credential_hasher::account_handler";

// Request

/// json for register request
#[derive(Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// json for login request
#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// json for account update; omitted fields are left as they are
#[derive(Serialize, Deserialize, Default)]
pub struct UpdateAccountRequest {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

// Response

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: String,
    pub username: String,
    pub display_name: String,
}

impl From<Account> for AccountInfo {
    fn from(account: Account) -> Self {
        Self {
            id: account.id().to_string(),
            username: account.username().to_string(),
            display_name: account.display_name().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(err: DomainError) -> Response {
    let status = match &err {
        e if e.is_validation() => StatusCode::BAD_REQUEST,
        DomainError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
        DomainError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        _ => {
            tracing::error!(target: TRACING_TARGET, error = %err, "request failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                }),
            )
                .into_response();
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/* Router Function and Handler Function */

/// function return Router object
/// Suppose to be nested by main router
pub fn create_account_router<
    R: AccountRepository + Send + Sync + 'static,
    P: PasswordHasher + Send + Sync + 'static,
>(
    register_service: RegisterAccountUsecase<R>,
    login_service: LoginUsecase<R, P>,
    update_service: UpdateAccountUsecase<R>,
) -> Router {
    let state = AppState {
        register_service: Arc::new(register_service),
        login_service: Arc::new(login_service),
        update_service: Arc::new(update_service),
    };

    Router::new()
        .route("/register", post(register::<R, P>))
        .route("/login", post(login::<R, P>))
        .route("/accounts/{id}", patch(update_account::<R, P>))
        .with_state(state)
}

pub struct AppState<R: AccountRepository, P: PasswordHasher> {
    pub register_service: Arc<RegisterAccountUsecase<R>>,
    pub login_service: Arc<LoginUsecase<R, P>>,
    pub update_service: Arc<UpdateAccountUsecase<R>>,
}

impl<R: AccountRepository, P: PasswordHasher> Clone for AppState<R, P> {
    fn clone(&self) -> Self {
        Self {
            register_service: Arc::clone(&self.register_service),
            login_service: Arc::clone(&self.login_service),
            update_service: Arc::clone(&self.update_service),
        }
    }
}

// handler function

/// handler function for register
async fn register<
    R: AccountRepository + Send + Sync + 'static,
    P: PasswordHasher + Send + Sync + 'static,
>(
    State(state): State<AppState<R, P>>,
    Json(payload): Json<RegisterRequest>,
) -> Response {
    match state
        .register_service
        .register(payload.username, payload.display_name, payload.password)
        .await
    {
        Ok(account) => (StatusCode::CREATED, Json(AccountInfo::from(account))).into_response(),
        Err(e) => error_response(e),
    }
}

/// handler function for login
async fn login<
    R: AccountRepository + Send + Sync + 'static,
    P: PasswordHasher + Send + Sync + 'static,
>(
    State(state): State<AppState<R, P>>,
    Json(payload): Json<LoginRequest>,
) -> Response {
    match state
        .login_service
        .login(payload.username, payload.password)
        .await
    {
        Ok(account) => (StatusCode::OK, Json(AccountInfo::from(account))).into_response(),
        Err(e) => error_response(e),
    }
}

/// handler function for partial account update
async fn update_account<
    R: AccountRepository + Send + Sync + 'static,
    P: PasswordHasher + Send + Sync + 'static,
>(
    State(state): State<AppState<R, P>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAccountRequest>,
) -> Response {
    let changes = AccountChanges {
        display_name: payload.display_name,
        password: payload.password,
    };

    match state.update_service.update(id, changes).await {
        Ok(account) => (StatusCode::OK, Json(AccountInfo::from(account))).into_response(),
        Err(e) => error_response(e),
    }
}
