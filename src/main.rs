pub mod modules;
pub mod shared;
pub use modules::auth;
pub use modules::portfolio;
pub mod health;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::adapter::outgoing::security::argon2_hasher::Argon2Hasher;
use crate::auth::adapter::outgoing::token_revocation_redis::RedisTokenRevocationStore;
use crate::auth::application::ports::outgoing::password_hasher::PasswordHasher;
use crate::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::auth::application::ports::outgoing::token_revocation::TokenRevocationStore;
use crate::auth::application::use_cases::{
    check_session::{CheckSessionUseCase, ICheckSessionUseCase},
    login_operator::{ILoginOperatorUseCase, LoginOperatorUseCase},
    logout_operator::{ILogoutOperatorUseCase, LogoutOperatorUseCase},
};
use crate::auth::domain::operator::OperatorAccount;

use crate::portfolio::adapter::outgoing::document_store_postgres::DocumentStorePostgres;
use crate::portfolio::application::service::{IPortfolioService, PortfolioService};
use crate::shared::api::custom_json_config;

use actix_web::{web, App, HttpServer};

use sea_orm::{ConnectOptions, Database};
use std::env;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

/// Raw upload bodies may carry a full inline file; the JSON routes stay on
/// the actix default limit.
const MAX_PAYLOAD_BYTES: usize = 2 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub portfolio_service: Arc<dyn IPortfolioService>,
    pub login_operator_use_case: Arc<dyn ILoginOperatorUseCase>,
    pub logout_operator_use_case: Arc<dyn ILogoutOperatorUseCase>,
    pub check_session_use_case: Arc<dyn ICheckSessionUseCase>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Environtment variable loading
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    // Load Env. variables
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let host = env::var("HOST").expect("HOST is not set in .env file");
    let port = env::var("PORT").expect("PORT is not set in .env file");
    let redis_url = env::var("REDIS_URL").expect("REDIS_URL is not set in .env file");

    let server_url = format!("{host}:{port}");
    println!("Server run on: {}", server_url);

    // Database connection
    let mut opt = ConnectOptions::new(db_url.clone());
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .expect("Failed to connect to database");

    let db_arc = Arc::new(conn);

    // Redis connection
    let redis_client =
        Arc::new(redis::Client::open(redis_url.as_str()).expect("Failed to create Redis client"));

    // Auth components
    let jwt_service = JwtTokenService::new(JwtConfig::from_env());
    let access_token_expiry = jwt_service.access_token_expiry() as u64;
    let operator = OperatorAccount::from_env();

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::from_env());
    let token_provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service);
    let revocation_store: Arc<dyn TokenRevocationStore> =
        Arc::new(RedisTokenRevocationStore::new(Arc::clone(&redis_client)));

    let login_operator_use_case = LoginOperatorUseCase::new(
        operator,
        password_hasher,
        Arc::clone(&token_provider) as Arc<dyn TokenProvider>,
        access_token_expiry,
    );
    let logout_operator_use_case = LogoutOperatorUseCase::new(
        Arc::clone(&revocation_store),
        Arc::clone(&token_provider) as Arc<dyn TokenProvider>,
    );
    let check_session_use_case =
        CheckSessionUseCase::new(
            Arc::clone(&token_provider) as Arc<dyn TokenProvider>,
            revocation_store,
        );

    // Portfolio document service and its store subscription
    let document_store = Arc::new(DocumentStorePostgres::new(Arc::clone(&db_arc), db_url));
    let portfolio_service = Arc::new(PortfolioService::new(document_store));
    tokio::spawn(Arc::clone(&portfolio_service).run_subscription());

    let state = AppState {
        portfolio_service,
        login_operator_use_case: Arc::new(login_operator_use_case),
        logout_operator_use_case: Arc::new(logout_operator_use_case),
        check_session_use_case: Arc::new(check_session_use_case),
    };

    // Clone db_arc for use in HttpServer closure
    let db_for_server = Arc::clone(&db_arc);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(web::Data::new(Arc::clone(&db_for_server)))
            .app_data(web::Data::new(Arc::clone(&redis_client)))
            .app_data(custom_json_config())
            .app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Portfolio document
    cfg.service(crate::portfolio::adapter::incoming::web::routes::get_portfolio_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::stream_portfolio_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::update_section_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::create_project_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::update_project_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::delete_project_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::create_resume_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::update_resume_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::delete_resume_handler);
    cfg.service(crate::portfolio::adapter::incoming::web::routes::upload_handler);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::login_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::logout_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::session_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
