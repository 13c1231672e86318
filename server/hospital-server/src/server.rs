use anyhow::Context;
use auth_identity::{
    IdentityConfig, IdentityService, InMemoryUserRepository, PasswordScheme, PgUserRepository,
    TokenService, UserRepository,
};
use axum::extract::FromRef;
use config_engine::{AuthSettings, HospitalConfig, PasswordSchemeSetting, ServerSettings};
use database_layer::{
    AppointmentRepository, DatabasePool, DoctorRepository, InMemoryStore, PgAppointmentRepository,
    PgDoctorRepository, PgPrescriptionRepository, PrescriptionRepository,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::services::{AppointmentService, DoctorService, PrescriptionService};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct HospitalServer {
    pub identity: Arc<IdentityService>,
    pub tokens: Arc<TokenService>,
    pub appointments: Arc<AppointmentService>,
    pub prescriptions: Arc<PrescriptionService>,
    pub doctors: Arc<DoctorService>,
    /// `None` when running on the in-memory store
    pub db_pool: Option<DatabasePool>,
    pub settings: Arc<ServerSettings>,
    pub started_at: Instant,
}

/// Repository set backing one server instance
struct Stores {
    users: Arc<dyn UserRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    prescriptions: Arc<dyn PrescriptionRepository>,
    doctors: Arc<dyn DoctorRepository>,
}

impl Stores {
    fn postgres(pool: &DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(PgUserRepository::new(pg.clone())),
            appointments: Arc::new(PgAppointmentRepository::new(pg.clone())),
            prescriptions: Arc::new(PgPrescriptionRepository::new(pg.clone())),
            doctors: Arc::new(PgDoctorRepository::new(pg)),
        }
    }

    fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            appointments: Arc::new(store.clone()),
            prescriptions: Arc::new(store.clone()),
            doctors: Arc::new(store),
        }
    }
}

/// Map the `auth` config section onto identity settings
pub fn identity_config(auth: &AuthSettings) -> IdentityConfig {
    IdentityConfig {
        jwt_secret: auth.jwt_secret.clone(),
        token_ttl_hours: auth.token_ttl_hours,
        issuer: auth.issuer.clone(),
        password_scheme: match auth.password_scheme {
            PasswordSchemeSetting::Bcrypt => PasswordScheme::Bcrypt {
                cost: auth.bcrypt_cost,
            },
            PasswordSchemeSetting::Argon2 => PasswordScheme::Argon2,
        },
    }
}

impl HospitalServer {
    /// Build the server from loaded configuration
    ///
    /// Connects to PostgreSQL when `database.url` is set, otherwise falls back
    /// to the in-memory store. Creates the bootstrap admin when configured.
    ///
    /// # Errors
    ///
    /// Fails when the database is unreachable, migrations fail, or the
    /// bootstrap admin cannot be created.
    pub async fn new(config: &HospitalConfig) -> anyhow::Result<Self> {
        let (stores, db_pool) = match config.database.url.as_deref() {
            Some(url) => {
                let pool = DatabasePool::new(url, config.database.max_connections)
                    .await
                    .context("Failed to connect to PostgreSQL")?;
                if config.database.run_migrations {
                    pool.run_migrations()
                        .await
                        .context("Failed to apply database migrations")?;
                }
                info!("Using PostgreSQL store");
                (Stores::postgres(&pool), Some(pool))
            }
            None => {
                warn!("database.url is not set; using the in-memory store (data is lost on restart)");
                (Stores::in_memory(), None)
            }
        };

        let server = Self::from_stores(
            stores,
            db_pool,
            &identity_config(&config.auth),
            config.server.clone(),
        );

        if let (Some(email), Some(password)) = (
            config.auth.bootstrap_admin_email.as_deref(),
            config.auth.bootstrap_admin_password.as_ref(),
        ) {
            let created = server
                .identity
                .ensure_bootstrap_admin(email, password)
                .await
                .context("Failed to create bootstrap admin account")?;
            if created {
                info!("Bootstrap admin account created");
            }
        }

        Ok(server)
    }

    /// Server backed entirely by in-memory storage
    pub fn in_memory(identity: &IdentityConfig, settings: ServerSettings) -> Self {
        Self::from_stores(Stores::in_memory(), None, identity, settings)
    }

    fn from_stores(
        stores: Stores,
        db_pool: Option<DatabasePool>,
        identity_config: &IdentityConfig,
        settings: ServerSettings,
    ) -> Self {
        let identity = Arc::new(IdentityService::new(stores.users, identity_config));
        let tokens = identity.token_service();

        Self {
            appointments: Arc::new(AppointmentService::new(stores.appointments)),
            prescriptions: Arc::new(PrescriptionService::new(stores.prescriptions)),
            doctors: Arc::new(DoctorService::new(stores.doctors, Arc::clone(&identity))),
            identity,
            tokens,
            db_pool,
            settings: Arc::new(settings),
            started_at: Instant::now(),
        }
    }

    /// Close the connection pool if there is one
    pub async fn shutdown(&self) {
        if let Some(pool) = &self.db_pool {
            pool.close().await;
        }
    }
}

impl FromRef<HospitalServer> for Arc<TokenService> {
    fn from_ref(server: &HospitalServer) -> Self {
        Arc::clone(&server.tokens)
    }
}

impl std::fmt::Debug for HospitalServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HospitalServer")
            .field("identity", &self.identity)
            .field("db_pool", &self.db_pool.is_some())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
