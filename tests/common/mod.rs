#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use snaplink::application::services::LinkService;
use snaplink::domain::entities::Link;
use snaplink::domain::repositories::LinkRepository;
use snaplink::error::AppError;
use snaplink::state::AppState;

pub const TEST_BASE_URL: &str = "https://s.test";

/// In-memory link store mirroring the PostgreSQL repository's semantics
/// (deleted-aware upsert, active-only increments, idempotent delete), so
/// handler tests run without a database.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<HashMap<String, Link>>,
}

impl InMemoryLinkRepository {
    pub fn get(&self, code: &str) -> Option<Link> {
        self.links.lock().unwrap().get(code).cloned()
    }

    pub fn insert_active(&self, code: &str, url: &str) {
        self.insert_active_at(code, url, Utc::now());
    }

    pub fn insert_active_at(&self, code: &str, url: &str, created_at: DateTime<Utc>) {
        let link = Link::new(
            code.to_string(),
            url.to_string(),
            false,
            0,
            None,
            created_at,
        );
        self.links.lock().unwrap().insert(code.to_string(), link);
    }

    /// Seeds a soft-deleted row that has accumulated clicks, for reuse tests.
    pub fn insert_deleted(&self, code: &str, url: &str) {
        let link = Link::new(
            code.to_string(),
            url.to_string(),
            true,
            42,
            Some(Utc::now()),
            Utc::now(),
        );
        self.links.lock().unwrap().insert(code.to_string(), link);
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.lock().unwrap().get(code).cloned())
    }

    async fn upsert(&self, code: &str, target_url: &str) -> Result<Option<Link>, AppError> {
        let mut links = self.links.lock().unwrap();

        if let Some(existing) = links.get(code)
            && existing.is_active()
        {
            return Ok(None);
        }

        let link = Link::fresh(code.to_string(), target_url.to_string());
        links.insert(code.to_string(), link.clone());
        Ok(Some(link))
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();

        match links.get_mut(code) {
            Some(link) if link.is_active() => {
                link.total_clicks += 1;
                link.last_clicked = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_deleted(&self, code: &str) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();

        match links.get_mut(code) {
            Some(link) => {
                link.deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_active(&self) -> Result<Vec<Link>, AppError> {
        let links = self.links.lock().unwrap();

        let mut active: Vec<Link> = links.values().filter(|l| l.is_active()).cloned().collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Builds an [`AppState`] over a fresh in-memory store and hands back the
/// store handle for seeding and post-request inspection.
pub fn create_test_state() -> (AppState, Arc<InMemoryLinkRepository>) {
    let repo = Arc::new(InMemoryLinkRepository::default());
    let link_service = Arc::new(LinkService::new(repo.clone(), TEST_BASE_URL));

    (AppState { link_service }, repo)
}
