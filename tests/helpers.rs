use raffler_backend::config::DatabaseConfig;
use raffler_backend::database::{create_pool, run_migrations};
use raffler_backend::models::*;
use raffler_backend::repositories::*;
use raffler_backend::services::*;
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;

/// Test database backed by a SQLite file in a temp directory
pub struct TestDatabase {
    // Held so the directory outlives the pool
    _dir: TempDir,
    pub pool: SqlitePool,
    pub participant_repo: Arc<ParticipantRepository>,
    pub event_repo: Arc<EventRepository>,
    pub raffle_repo: Arc<RaffleRepository>,
    pub participant_service: Arc<ParticipantService>,
    pub event_service: Arc<EventService>,
    pub raffle_service: Arc<RaffleService>,
}

impl TestDatabase {
    /// Create a fresh database with migrations applied
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("raffler_test.db");

        let config = DatabaseConfig {
            path: path.to_string_lossy().into_owned(),
            max_connections: 5,
            acquire_timeout_secs: 10,
            idle_timeout_secs: 300,
            max_lifetime_secs: 600,
        };

        let pool = create_pool(&config)
            .await
            .expect("Failed to create test database pool");

        run_migrations(&pool, None)
            .await
            .expect("Failed to run migrations");

        let participant_repo = Arc::new(ParticipantRepository::new(pool.clone()));
        let event_repo = Arc::new(EventRepository::new(pool.clone()));
        let raffle_repo = Arc::new(RaffleRepository::new(pool.clone()));

        Self {
            pool,
            participant_service: Arc::new(ParticipantService::new(participant_repo.clone())),
            event_service: Arc::new(EventService::new(event_repo.clone())),
            raffle_service: Arc::new(RaffleService::new(
                raffle_repo.clone(),
                participant_repo.clone(),
            )),
            participant_repo,
            event_repo,
            raffle_repo,
            _dir: dir,
        }
    }
}

/// Register one participant through the service layer
pub async fn create_test_participant(
    db: &TestDatabase,
    name: &str,
    is_family: bool,
) -> Participant {
    db.participant_service
        .register(name, is_family)
        .await
        .expect("Failed to register participant")
}

/// Create a draft raffle through the service layer
pub async fn create_test_raffle(
    db: &TestDatabase,
    title: &str,
    raffle_type: &str,
    count: i64,
    audience: &str,
    exclude_previous_winners: bool,
) -> RaffleWithWinners {
    db.raffle_service
        .create_draft(
            title,
            None,
            None,
            raffle_type,
            count,
            audience,
            exclude_previous_winners,
            None,
        )
        .await
        .expect("Failed to create raffle draft")
}
