//! Karma Portal server binary.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use karma_portal::adapters::auth::{Argon2PasswordHasher, JwtSessionValidator};
use karma_portal::adapters::auth_service::HttpAuthServiceClient;
use karma_portal::adapters::email::ResendEmailSender;
use karma_portal::adapters::http::{
    app_router, ApiStates, AuthState, IntegrationAppState, RegisterAppState, RoleAppState,
    VoucherAppState,
};
use karma_portal::adapters::postgres::{
    PostgresDynamicRoleRepository, PostgresIntegrationRepository, PostgresReferenceData,
    PostgresRoleReader, PostgresTaskCatalog, PostgresUserDirectory, PostgresUserRepository,
    PostgresVoucherRepository,
};
use karma_portal::adapters::voucher::{EmailVoucherNotifier, SvgVoucherRenderer};
use karma_portal::config::{AppConfig, ServerConfig};
use karma_portal::domain::integration::ConfirmationTokens;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let pool = config.database.connect().await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations applied");
    }

    let email = Arc::new(ResendEmailSender::from_config(&config.email)?);
    let auth_service = Arc::new(HttpAuthServiceClient::new(
        config.auth.auth_base_url(),
        Duration::from_secs(config.auth.request_timeout_secs),
    )?);
    let signing_secret = config.auth.signing_secret();

    let roles = Arc::new(PostgresRoleReader::new(pool.clone()));
    let vouchers = Arc::new(PostgresVoucherRepository::new(pool.clone()));

    let states = ApiStates {
        voucher: VoucherAppState {
            users: Arc::new(PostgresUserDirectory::new(pool.clone())),
            tasks: Arc::new(PostgresTaskCatalog::new(pool.clone())),
            notifier: Arc::new(EmailVoucherNotifier::new(
                Arc::new(SvgVoucherRenderer::new()),
                email.clone(),
            )),
            repository: vouchers.clone(),
            reader: vouchers,
        },
        role: RoleAppState {
            roles: roles.clone(),
            dynamic_roles: Arc::new(PostgresDynamicRoleRepository::new(pool.clone())),
        },
        integration: IntegrationAppState {
            integrations: Arc::new(PostgresIntegrationRepository::new(pool.clone())),
            auth_service: auth_service.clone(),
            tokens: ConfirmationTokens::new(
                &signing_secret,
                config.auth.confirmation_token_ttl_secs,
            ),
        },
        register: RegisterAppState {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            hasher: Arc::new(Argon2PasswordHasher::new()),
            auth_service,
            email,
            reference: Arc::new(PostgresReferenceData::new(pool.clone())),
            roles,
        },
    };
    let auth = AuthState::new(
        Arc::new(JwtSessionValidator::new(&signing_secret)),
        config.auth.admin_role.as_str(),
    );

    let app = app_router(states, auth, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "Karma portal listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// JSON logs in production, human-readable output elsewhere.
///
/// `RUST_LOG` overrides the configured level.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if server.is_production() {
        builder.json().with_target(false).try_init()
    } else {
        builder.pretty().try_init()
    };
    if let Err(err) = result {
        eprintln!("tracing already initialized: {}", err);
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    info!("Shutting down");
}
