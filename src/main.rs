use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use sea_orm::{ActiveModelBehavior, ConnectOptions, Database};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use credential_hasher::{
    Argon2PasswordHasher, CredentialHasher, FieldAccess, HasherConfig,
    infrastructure::{account_repository::SeaOrmAccountRepository, entity::accounts},
    presentation::handlers::account_handler::create_account_router,
    usecase::{
        login_usecase::LoginUsecase, register_account_usecase::RegisterAccountUsecase,
        update_account_usecase::UpdateAccountUsecase,
    },
};

const TRACING_TARGET: &str = "credential_hasher::server";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a missing .env is fine, variables may come from the environment
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = HasherConfig::from_env()?;
    // fail at startup rather than on the first insert
    accounts::ActiveModel::new().get_field(config.password_field())?;
    tracing::info!(
        target: TRACING_TARGET,
        password_field = %config.password_field(),
        allow_empty_password = config.allow_empty_password(),
        "credential hasher configured"
    );

    let mut opt = ConnectOptions::new(dotenvy::var("DATABASE_URL")?);
    opt.max_connections(10)
        .min_connections(1)
        .sqlx_logging(true);
    let db = Database::connect(opt).await?;

    let credential_hasher = CredentialHasher::new(config, Argon2PasswordHasher::new());
    let account_repository = SeaOrmAccountRepository::new(Arc::new(db), credential_hasher.clone());

    let register_usecase = RegisterAccountUsecase::new(account_repository.clone());
    let login_usecase = LoginUsecase::new(account_repository.clone(), credential_hasher);
    let update_usecase = UpdateAccountUsecase::new(account_repository);

    let app = Router::new()
        .route("/", get(|| async { "ok" }))
        .nest(
            "/api",
            create_account_router(register_usecase, login_usecase, update_usecase),
        );

    let addr: SocketAddr = dotenvy::var("BIND_ADDRESS")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string())
        .parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(target: TRACING_TARGET, %addr, "listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
