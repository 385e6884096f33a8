//! Principal Service Server
//!
//! Serves the users, user invites and groups REST APIs.
//!
//! ## Configuration
//!
//! Read from `config.toml` (or `PRINCIPAL_CONFIG`) with `PRINCIPAL_*`
//! environment overrides:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PRINCIPAL_HTTP_PORT` | `8080` | HTTP API port |
//! | `PRINCIPAL_MONGODB_URI` | `mongodb://localhost:27017` | MongoDB connection URL |
//! | `PRINCIPAL_MONGODB_DATABASE` | `principal` | MongoDB database name |
//! | `PRINCIPAL_LICENSE_URL` | `http://localhost:8081` | License Manager base URL |
//! | `PRINCIPAL_EMAIL_URL` | `http://localhost:8082` | Email service base URL |
//! | `PRINCIPAL_TENANT_URL` | `http://localhost:8083` | Tenant service base URL |
//! | `PRINCIPAL_DEV_MODE` | `false` | In-memory stores, events logged |
//! | `RUST_LOG` | `info` | Log level |

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use ps_common::shutdown_signal;
use ps_config::AppConfig;
use ps_license::{Config as LicenseConfig, LicenseApi, LicenseManagerClient};
use ps_platform::group::operations::{
    CreateGroupUseCase, DeleteGroupUseCase, GetGroupUseCase, ListGroupsUseCase, UpdateGroupUseCase,
};
use ps_platform::shared::indexes::initialize_indexes;
use ps_platform::user::operations::{
    CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, LockUserUseCase,
    UpdateUserUseCase,
};
use ps_platform::user_invite::operations::{
    CreateUserInviteListUseCase, ListUserInvitesUseCase, ResendEmailInviteUseCase,
};
use ps_platform::user_invite::EmailClassifier;
use ps_platform::usecase::{ChannelEventPublisher, LoggingEventSink, MongoEventSink};
use ps_platform::{
    groups_router, user_invites_router, users_router, EmailApi, EventPublisher, Group,
    GroupsState, HttpEmailClient, HttpTenantClient, InMemoryRepository, MongoRepository,
    Repository, TenantApi, User, UserInvite, UserInvitesState, UsersState,
};

const EVENT_CHANNEL_CAPACITY: usize = 1024;

struct Stores {
    users: Arc<dyn Repository<User>>,
    invites: Arc<dyn Repository<UserInvite>>,
    groups: Arc<dyn Repository<Group>>,
    publisher: Arc<dyn EventPublisher>,
}

async fn build_stores(config: &AppConfig) -> Result<Stores> {
    let (publisher, receiver) = ChannelEventPublisher::new(EVENT_CHANNEL_CAPACITY);

    if config.dev_mode {
        warn!("Dev mode: in-memory stores, events are logged and discarded");
        tokio::spawn(LoggingEventSink::new(receiver).run());
        return Ok(Stores {
            users: Arc::new(InMemoryRepository::<User>::new()),
            invites: Arc::new(InMemoryRepository::<UserInvite>::new()),
            groups: Arc::new(InMemoryRepository::<Group>::new()),
            publisher: Arc::new(publisher),
        });
    }

    info!("Connecting to MongoDB: {}/{}", config.mongodb.uri, config.mongodb.database);
    let client = mongodb::Client::with_uri_str(&config.mongodb.uri).await?;
    let db = client.database(&config.mongodb.database);

    initialize_indexes(&db).await?;
    tokio::spawn(MongoEventSink::new(&db, receiver).run());

    Ok(Stores {
        users: Arc::new(MongoRepository::<User>::new(&db)),
        invites: Arc::new(MongoRepository::<UserInvite>::new(&db)),
        groups: Arc::new(MongoRepository::<Group>::new(&db)),
        publisher: Arc::new(publisher),
    })
}

fn reserved_tenants(config: &AppConfig) -> Vec<Uuid> {
    config
        .users
        .reserved_tenant_ids
        .iter()
        .filter_map(|raw| match Uuid::parse_str(raw.trim()) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(tenant_id = %raw, error = %e, "Ignoring invalid reserved tenant id");
                None
            }
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    ps_common::logging::init_logging("principal-service");

    info!("Starting Principal Service");

    let config = AppConfig::load()?;
    let stores = build_stores(&config).await?;

    // Downstream services
    let timeout = Duration::from_secs(config.services.timeout_secs);
    let license_api: Arc<dyn LicenseApi> = Arc::new(LicenseManagerClient::new(
        LicenseConfig::new(&config.services.license_url)
            .with_timeout(timeout)
            .with_retry(config.services.retry_attempts, Duration::from_millis(100)),
    )?);
    let email_api: Arc<dyn EmailApi> =
        Arc::new(HttpEmailClient::new(&config.services.email_url, timeout)?);
    let tenant_api: Arc<dyn TenantApi> =
        Arc::new(HttpTenantClient::new(&config.services.tenant_url, timeout)?);

    let users_state = UsersState {
        create: Arc::new(
            CreateUserUseCase::new(
                stores.users.clone(),
                license_api.clone(),
                email_api.clone(),
                stores.publisher.clone(),
            )
            .with_reserved_tenants(reserved_tenants(&config)),
        ),
        get: Arc::new(GetUserUseCase::new(stores.users.clone())),
        update: Arc::new(UpdateUserUseCase::new(stores.users.clone(), stores.publisher.clone())),
        delete: Arc::new(DeleteUserUseCase::new(
            stores.users.clone(),
            license_api,
            stores.publisher.clone(),
        )),
        lock: Arc::new(LockUserUseCase::new(stores.users.clone(), stores.publisher.clone())),
        list: Arc::new(ListUsersUseCase::new(stores.users.clone())),
    };

    let invites_state = UserInvitesState {
        create_list: Arc::new(CreateUserInviteListUseCase::new(
            stores.invites.clone(),
            stores.users.clone(),
            tenant_api,
            email_api.clone(),
            EmailClassifier::new(&config.invites.free_email_domains),
        )),
        resend: Arc::new(ResendEmailInviteUseCase::new(stores.invites.clone(), email_api)),
        list: Arc::new(ListUserInvitesUseCase::new(stores.invites.clone())),
    };

    let groups_state = GroupsState {
        create: Arc::new(CreateGroupUseCase::new(stores.groups.clone(), stores.publisher.clone())),
        get: Arc::new(GetGroupUseCase::new(stores.groups.clone())),
        update: Arc::new(UpdateGroupUseCase::new(stores.groups.clone(), stores.publisher.clone())),
        delete: Arc::new(DeleteGroupUseCase::new(
            stores.groups.clone(),
            stores.users.clone(),
            stores.publisher.clone(),
        )),
        list: Arc::new(ListGroupsUseCase::new(stores.groups.clone())),
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .nest("/api/users", users_router(users_state))
        .nest("/api/user-invites", user_invites_router(invites_state))
        .nest("/api/groups", groups_router(groups_state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));

    let addr = format!("{}:{}", config.http.host, config.http.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Principal Service shutdown complete");
    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "UP",
        "service": "principal-service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
