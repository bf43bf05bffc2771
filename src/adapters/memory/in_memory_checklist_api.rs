//! In-Memory Checklist API Adapter
//!
//! Mirrors the backend's checklist semantics in process:
//! - an empty season is seeded with its default tasks on first read
//! - items are listed by `is_completed`, then `task`
//! - toggling stamps or clears `completed_at`
//! - editing a default task turns it into a custom one
//!
//! Also supports failure injection, per-operation call counts and pausing,
//! which makes it the backend of choice for tests and offline runs.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use crate::domain::checklist::{
    default_tasks, ChecklistItem, ChecklistItemUpdate, NewChecklistItem, Season, ToggleAck,
};
use crate::domain::foundation::{ChecklistItemId, PropertyId, Timestamp};
use crate::ports::{ApiError, ChecklistApi};

/// Port operations, for call counting and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Create,
    Update,
    Toggle,
    Delete,
    Reset,
}

#[derive(Debug, Default)]
struct Store {
    items: Vec<ChecklistItem>,
    next_id: i64,
}

impl Store {
    fn allocate_id(&mut self) -> ChecklistItemId {
        self.next_id += 1;
        ChecklistItemId::from(self.next_id)
    }

    fn is_scoped(item: &ChecklistItem, property_id: &PropertyId, season: Season) -> bool {
        item.property_id == *property_id && item.season == season
    }

    fn seed_defaults(&mut self, property_id: &PropertyId, season: Season) {
        let now = Timestamp::now();
        for template in default_tasks(season) {
            let id = self.allocate_id();
            self.items.push(ChecklistItem {
                id,
                task: template.task.to_string(),
                description: Some(template.description.to_string()),
                season,
                property_id: property_id.clone(),
                is_completed: false,
                completed_at: None,
                is_default: true,
                created_at: Some(now),
                updated_at: Some(now),
            });
        }
    }

    fn listing(&self, property_id: &PropertyId, season: Season) -> Vec<ChecklistItem> {
        let mut items: Vec<ChecklistItem> = self
            .items
            .iter()
            .filter(|item| Self::is_scoped(item, property_id, season))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.is_completed
                .cmp(&b.is_completed)
                .then_with(|| a.task.cmp(&b.task))
        });
        items
    }

    fn find_mut(&mut self, id: &ChecklistItemId) -> Result<&mut ChecklistItem, ApiError> {
        self.items
            .iter_mut()
            .find(|item| item.id == *id)
            .ok_or_else(|| ApiError::NotFound("Checklist item not found".to_string()))
    }
}

/// In-process `ChecklistApi` with server semantics.
#[derive(Debug, Default)]
pub struct InMemoryChecklistApi {
    store: Mutex<Store>,
    failures: Mutex<HashMap<Operation, VecDeque<ApiError>>>,
    failing_seasons: Mutex<HashSet<Season>>,
    calls: Mutex<HashMap<Operation, usize>>,
    omit_toggle_body: bool,
    paused: AtomicBool,
    resumed: Notify,
}

impl InMemoryChecklistApi {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acknowledges toggles without a body, like older backend versions.
    pub fn without_toggle_body(mut self) -> Self {
        self.omit_toggle_body = true;
        self
    }

    /// Makes the next `count` calls of `operation` fail with a 500.
    pub fn fail_next(&self, operation: Operation, count: usize) {
        self.fail_next_with(
            operation,
            count,
            ApiError::from_status(500, "Simulated server failure"),
        );
    }

    /// Makes the next `count` calls of `operation` fail with `error`.
    pub fn fail_next_with(&self, operation: Operation, count: usize, error: ApiError) {
        let mut failures = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        let queue = failures.entry(operation).or_default();
        queue.extend(std::iter::repeat(error).take(count));
    }

    /// Makes every get for `season` fail until `heal_season` is called.
    pub fn fail_season(&self, season: Season) {
        self.failing_seasons
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(season);
    }

    pub fn heal_season(&self, season: Season) {
        self.failing_seasons
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&season);
    }

    /// Number of calls made to `operation`, failed ones included.
    pub fn call_count(&self, operation: Operation) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&operation)
            .copied()
            .unwrap_or(0)
    }

    /// Holds every subsequent call until `resume`.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
        self.resumed.notify_waiters();
    }

    /// Stored items for a property and season, in listing order. Never seeds.
    pub fn items(&self, property_id: &PropertyId, season: Season) -> Vec<ChecklistItem> {
        self.lock_store().listing(property_id, season)
    }

    /// Stores an item as-is, e.g. to prepare a scenario.
    pub fn insert(&self, item: ChecklistItem) {
        let mut store = self.lock_store();
        if let Ok(numeric) = item.id.to_string().parse::<i64>() {
            store.next_id = store.next_id.max(numeric);
        }
        store.items.push(item);
    }

    fn lock_store(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Counts the call, waits while paused, then applies any injected failure.
    async fn enter(&self, operation: Operation) -> Result<(), ApiError> {
        *self
            .calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(operation)
            .or_insert(0) += 1;

        loop {
            let resumed = self.resumed.notified();
            if !self.paused.load(Ordering::SeqCst) {
                break;
            }
            resumed.await;
        }

        let injected = self
            .failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_mut(&operation)
            .and_then(VecDeque::pop_front);
        match injected {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ChecklistApi for InMemoryChecklistApi {
    async fn get_checklist(
        &self,
        property_id: &PropertyId,
        season: Season,
    ) -> Result<Value, ApiError> {
        self.enter(Operation::Get).await?;
        if self
            .failing_seasons
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&season)
        {
            return Err(ApiError::from_status(500, "Simulated season failure"));
        }

        let mut store = self.lock_store();
        if !store
            .items
            .iter()
            .any(|item| Store::is_scoped(item, property_id, season))
        {
            tracing::debug!(%property_id, %season, "Seeding default checklist");
            store.seed_defaults(property_id, season);
        }
        serde_json::to_value(store.listing(property_id, season))
            .map_err(|e| ApiError::decode(e.to_string()))
    }

    async fn create_item(&self, item: &NewChecklistItem) -> Result<(), ApiError> {
        self.enter(Operation::Create).await?;
        if item.task.trim().is_empty() {
            return Err(ApiError::from_status(400, "Task is required"));
        }

        let mut store = self.lock_store();
        let id = store.allocate_id();
        let now = Timestamp::now();
        store.items.push(ChecklistItem {
            id,
            task: item.task.clone(),
            description: item.description.clone(),
            season: item.season,
            property_id: item.property_id.clone(),
            is_completed: false,
            completed_at: None,
            is_default: item.is_default,
            created_at: Some(now),
            updated_at: Some(now),
        });
        Ok(())
    }

    async fn update_item(
        &self,
        id: &ChecklistItemId,
        update: &ChecklistItemUpdate,
    ) -> Result<(), ApiError> {
        self.enter(Operation::Update).await?;
        let mut store = self.lock_store();
        let item = store.find_mut(id)?;

        item.task = update.task.clone();
        item.description = Some(update.description.clone()).filter(|d| !d.is_empty());
        item.is_default = false;
        item.updated_at = Some(Timestamp::now());
        Ok(())
    }

    async fn toggle_item(&self, id: &ChecklistItemId) -> Result<Option<ToggleAck>, ApiError> {
        self.enter(Operation::Toggle).await?;
        let mut store = self.lock_store();
        let item = store.find_mut(id)?;

        let now = Timestamp::now();
        item.is_completed = !item.is_completed;
        item.completed_at = item.is_completed.then_some(now);
        item.updated_at = Some(now);

        if self.omit_toggle_body {
            return Ok(None);
        }
        Ok(Some(ToggleAck {
            id: Some(item.id.clone()),
            is_completed: item.is_completed,
            completed_at: item.completed_at,
        }))
    }

    async fn delete_item(&self, id: &ChecklistItemId) -> Result<(), ApiError> {
        self.enter(Operation::Delete).await?;
        let mut store = self.lock_store();
        let before = store.items.len();
        store.items.retain(|item| item.id != *id);
        if store.items.len() == before {
            return Err(ApiError::NotFound("Checklist item not found".to_string()));
        }
        Ok(())
    }

    async fn reset_checklist(
        &self,
        property_id: &PropertyId,
        season: Season,
    ) -> Result<(), ApiError> {
        self.enter(Operation::Reset).await?;
        let mut store = self.lock_store();
        store
            .items
            .retain(|item| !Store::is_scoped(item, property_id, season));
        store.seed_defaults(property_id, season);
        tracing::debug!(%property_id, %season, "Checklist reset to defaults");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid() -> PropertyId {
        PropertyId::from(1)
    }

    async fn listing(api: &InMemoryChecklistApi, season: Season) -> Vec<ChecklistItem> {
        let payload = api.get_checklist(&pid(), season).await.unwrap();
        serde_json::from_value(payload).unwrap()
    }

    #[tokio::test]
    async fn first_read_seeds_defaults() {
        let api = InMemoryChecklistApi::new();
        let items = listing(&api, Season::Fall).await;

        assert_eq!(items.len(), default_tasks(Season::Fall).len());
        assert!(items.iter().all(|i| i.is_default && i.season == Season::Fall));
        // Second read does not seed again.
        assert_eq!(listing(&api, Season::Fall).await.len(), items.len());
    }

    #[tokio::test]
    async fn seeding_is_per_property_and_season() {
        let api = InMemoryChecklistApi::new();
        listing(&api, Season::Spring).await;

        assert!(api.items(&pid(), Season::Summer).is_empty());
        assert!(api.items(&PropertyId::from(2), Season::Spring).is_empty());
    }

    #[tokio::test]
    async fn listing_orders_incomplete_first_then_by_task() {
        let api = InMemoryChecklistApi::new();
        let items = listing(&api, Season::Spring).await;
        let last = items.last().unwrap().id.clone();
        api.toggle_item(&items[0].id).await.unwrap();

        let items = listing(&api, Season::Spring).await;
        assert!(items.last().unwrap().is_completed);
        let open: Vec<_> = items.iter().filter(|i| !i.is_completed).map(|i| &i.task).collect();
        let mut sorted = open.clone();
        sorted.sort();
        assert_eq!(open, sorted);
        assert!(items.iter().any(|i| i.id == last));
    }

    #[tokio::test]
    async fn toggle_stamps_and_clears_completed_at() {
        let api = InMemoryChecklistApi::new();
        let id = listing(&api, Season::Winter).await[0].id.clone();

        let ack = api.toggle_item(&id).await.unwrap().unwrap();
        assert!(ack.is_completed);
        assert!(ack.completed_at.is_some());

        let ack = api.toggle_item(&id).await.unwrap().unwrap();
        assert!(!ack.is_completed);
        assert!(ack.completed_at.is_none());
    }

    #[tokio::test]
    async fn editing_clears_default_flag() {
        let api = InMemoryChecklistApi::new();
        let id = listing(&api, Season::Summer).await[0].id.clone();
        let update = ChecklistItemUpdate {
            task: "Service AC unit twice".to_string(),
            description: String::new(),
        };

        api.update_item(&id, &update).await.unwrap();
        let item = api
            .items(&pid(), Season::Summer)
            .into_iter()
            .find(|i| i.id == id)
            .unwrap();
        assert!(!item.is_default);
        assert_eq!(item.description, None);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let api = InMemoryChecklistApi::new();
        let missing = ChecklistItemId::from(404);
        assert!(matches!(api.toggle_item(&missing).await, Err(ApiError::NotFound(_))));
        assert!(matches!(api.delete_item(&missing).await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn reset_replaces_only_the_target_season() {
        let api = InMemoryChecklistApi::new();
        listing(&api, Season::Spring).await;
        listing(&api, Season::Fall).await;
        let custom = NewChecklistItem {
            task: "Custom".to_string(),
            description: None,
            season: Season::Spring,
            property_id: pid(),
            is_default: false,
        };
        api.create_item(&custom).await.unwrap();
        let fall_before = api.items(&pid(), Season::Fall);

        api.reset_checklist(&pid(), Season::Spring).await.unwrap();

        let spring = api.items(&pid(), Season::Spring);
        assert_eq!(spring.len(), default_tasks(Season::Spring).len());
        assert!(spring.iter().all(|i| i.is_default && !i.is_completed));
        assert_eq!(api.items(&pid(), Season::Fall), fall_before);
    }

    #[tokio::test]
    async fn injected_failures_are_consumed_in_order() {
        let api = InMemoryChecklistApi::new();
        api.fail_next_with(Operation::Get, 1, ApiError::Unauthorized);
        api.fail_next(Operation::Get, 1);

        assert_eq!(
            api.get_checklist(&pid(), Season::Fall).await.unwrap_err(),
            ApiError::Unauthorized
        );
        assert!(matches!(
            api.get_checklist(&pid(), Season::Fall).await,
            Err(ApiError::Server { status: 500, .. })
        ));
        assert!(api.get_checklist(&pid(), Season::Fall).await.is_ok());
        assert_eq!(api.call_count(Operation::Get), 3);
    }

    #[tokio::test]
    async fn failing_season_until_healed() {
        let api = InMemoryChecklistApi::new();
        api.fail_season(Season::Summer);
        assert!(api.get_checklist(&pid(), Season::Summer).await.is_err());
        assert!(api.get_checklist(&pid(), Season::Winter).await.is_ok());

        api.heal_season(Season::Summer);
        assert!(api.get_checklist(&pid(), Season::Summer).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_blank_task() {
        let api = InMemoryChecklistApi::new();
        let blank = NewChecklistItem {
            task: " ".to_string(),
            description: None,
            season: Season::Spring,
            property_id: pid(),
            is_default: false,
        };
        assert!(matches!(
            api.create_item(&blank).await,
            Err(ApiError::Rejected { status: 400, .. })
        ));
    }

    #[tokio::test]
    async fn paused_calls_wait_for_resume() {
        let api = std::sync::Arc::new(InMemoryChecklistApi::new());
        api.pause();

        let task = {
            let api = api.clone();
            tokio::spawn(async move { api.get_checklist(&PropertyId::from(1), Season::Fall).await })
        };
        tokio::task::yield_now().await;
        assert!(!task.is_finished());

        api.resume();
        assert!(task.await.unwrap().is_ok());
    }
}
