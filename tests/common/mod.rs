#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use civic_records::backend::{RemoteBackend, RemoteError};
use civic_records::entities::{NewRemoteUser, Priority, Report, ReportStatus, User};
use civic_records::storage::{KeyValueStore, MemoryStorage, Record};
use civic_records::utils::merge::{shallow_merge, Patch};
use serde_json::{Map, Value};

pub fn memory_storage() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStorage::new())
}

pub fn report(id: &str, status: ReportStatus, priority: Priority, email: &str) -> Report {
    Report {
        id: id.to_string(),
        status,
        priority,
        has_images: false,
        email: email.to_string(),
        created_at: None,
        extra: Map::new(),
    }
}

pub fn user(id: &str, email: &str, report_count: u32) -> User {
    User {
        id: id.to_string(),
        name: format!("User {}", id),
        email: email.to_string(),
        role: "citizen".to_string(),
        join_date: None,
        report_count,
        extra: Map::new(),
    }
}

pub fn patch(value: Value) -> Patch {
    value.as_object().cloned().expect("patch must be an object")
}

/// In-memory remote backend with a switch to make every call fail.
#[derive(Default)]
pub struct FakeRemote {
    pub users: Mutex<Vec<User>>,
    pub inserted: Mutex<Vec<NewRemoteUser>>,
    failing: AtomicBool,
    next_id: AtomicU32,
}

impl FakeRemote {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), RemoteError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RemoteError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteBackend for FakeRemote {
    fn backend_type(&self) -> &str {
        "fake"
    }

    async fn get_all_with_counts(&self) -> Result<Vec<User>, RemoteError> {
        self.check()?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<User>, RemoteError> {
        self.check()?;
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .map(Some)
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))
    }

    async fn insert(&self, row: NewRemoteUser) -> Result<User, RemoteError> {
        self.check()?;
        let id = format!("remote-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let user = User {
            id,
            name: row.name.clone(),
            email: row.email.clone(),
            role: row.role.clone(),
            join_date: Some(row.created_at),
            report_count: row.report_count,
            extra: Map::new(),
        };
        self.inserted.lock().unwrap().push(row);
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: &str, patch: &Patch) -> Result<User, RemoteError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let existing = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;
        *existing = shallow_merge(&*existing, patch, <User as Record>::FIELD_ALIASES)
            .map_err(|e| RemoteError::InvalidData(e.to_string()))?;
        Ok(existing.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        self.check()?;
        self.users.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }
}
