#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tripshare_access::{AccessConfig, AccessService, BaseUrlLinks, Notice, Notifier, NotifyError};
use tripshare_storage::{CreateUserParams, Store, Trip, User};
use tripshare_store_sqlite::SqliteStore;

pub const BASE_URL: &str = "https://trips.example.com";

/// Records every notice; optionally fails every send.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, Notice)>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(String, Notice)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, to: &str, notice: &Notice) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push((to.to_string(), notice.clone()));
        if self.fail {
            Err(NotifyError("smtp relay refused the message".to_string()))
        } else {
            Ok(())
        }
    }
}

pub struct Harness {
    pub access: AccessService<SqliteStore>,
    pub store: Arc<SqliteStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub owner: User,
    pub trip: Trip,
}

pub async fn harness() -> Harness {
    harness_with(RecordingNotifier::default(), AccessConfig::default()).await
}

pub async fn harness_with(notifier: RecordingNotifier, config: AccessConfig) -> Harness {
    let store = SqliteStore::open_in_memory().await.unwrap();
    harness_on(store, notifier, config).await
}

pub async fn harness_on(
    store: SqliteStore,
    notifier: RecordingNotifier,
    config: AccessConfig,
) -> Harness {
    let store = Arc::new(store);
    let notifier = Arc::new(notifier);
    let access = AccessService::new(
        store.clone(),
        Arc::new(BaseUrlLinks::new(BASE_URL).unwrap()),
        notifier.clone(),
        AccessConfig {
            io_timeout: Duration::from_secs(2),
            ..config
        },
    );

    let owner = user(&store, "owner@example.com").await;
    let trip = access.create_trip("Lisbon", &owner.id).await.unwrap();
    Harness {
        access,
        store,
        notifier,
        owner,
        trip,
    }
}

pub async fn user(store: &SqliteStore, email: &str) -> User {
    store
        .create_user(&CreateUserParams {
            email: email.to_string(),
            first_name: email.split('@').next().unwrap_or_default().to_string(),
            last_name: "Traveller".to_string(),
        })
        .await
        .unwrap()
}
