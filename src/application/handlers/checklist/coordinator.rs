//! ChecklistCoordinator - Optimistic mutations over one checklist view.
//!
//! Owns the visible `ChecklistView` for a single property and keeps it
//! responsive under edits while never letting it diverge from the backend
//! for longer than one failed round trip:
//!
//! - toggle is applied locally first; a failure triggers a corrective refetch
//! - add, update, delete and reset go to the server first and refetch on success
//! - delete and reset require confirmation through `ConfirmationPrompt`
//!
//! Every operation takes `&mut self`, so one coordinator runs one operation
//! at a time. Dropping an operation's future abandons it; the next operation
//! notices the leftover state and refetches server truth before proceeding.

use std::sync::Arc;

use super::aggregator::ChecklistAggregator;
use super::errors::{ChecklistError, MutationKind};
use crate::domain::checklist::{
    ChecklistItem, ChecklistItemUpdate, ChecklistStats, ChecklistView, ItemDraft,
    NewChecklistItem, Season, SyncState,
};
use crate::domain::foundation::{ChecklistItemId, PropertyId, StateMachine, ValidationError};
use crate::ports::{ApiError, ChecklistApi, ConfirmationPrompt, ConfirmationRequest};

/// Result of an operation that needs user confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The request was sent and succeeded.
    Applied,
    /// The user declined; nothing was sent.
    Cancelled,
}

/// Edit form state for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingItem {
    pub id: ChecklistItemId,
    pub draft: ItemDraft,
}

/// Checklist state and mutations for one property.
pub struct ChecklistCoordinator {
    api: Arc<dyn ChecklistApi>,
    aggregator: ChecklistAggregator,
    confirmation: Arc<dyn ConfirmationPrompt>,
    property_id: PropertyId,
    view: ChecklistView,
    state: SyncState,
    error: Option<ChecklistError>,
    message: Option<String>,
    draft: ItemDraft,
    show_add_form: bool,
    editing: Option<EditingItem>,
}

impl ChecklistCoordinator {
    /// Creates an empty, not yet loaded view for the current season.
    pub fn new(
        api: Arc<dyn ChecklistApi>,
        confirmation: Arc<dyn ConfirmationPrompt>,
        property_id: PropertyId,
    ) -> Self {
        Self::with_season(api, confirmation, property_id, Season::current())
    }

    pub fn with_season(
        api: Arc<dyn ChecklistApi>,
        confirmation: Arc<dyn ConfirmationPrompt>,
        property_id: PropertyId,
        season: Season,
    ) -> Self {
        Self {
            aggregator: ChecklistAggregator::new(api.clone()),
            api,
            confirmation,
            property_id,
            view: ChecklistView::empty(season),
            state: SyncState::Idle,
            error: None,
            message: None,
            draft: ItemDraft::default(),
            show_add_form: false,
            editing: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn property_id(&self) -> &PropertyId {
        &self.property_id
    }

    pub fn season(&self) -> Season {
        self.view.season()
    }

    pub fn view(&self) -> &ChecklistView {
        &self.view
    }

    pub fn items(&self) -> &[ChecklistItem] {
        self.view.items()
    }

    pub fn stats(&self) -> ChecklistStats {
        self.view.stats()
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// True while any request is in flight; controls should be disabled.
    pub fn is_loading(&self) -> bool {
        self.state != SyncState::Idle
    }

    pub fn error(&self) -> Option<&ChecklistError> {
        self.error.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn dismiss_message(&mut self) {
        self.message = None;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Form state
    // ─────────────────────────────────────────────────────────────────────

    pub fn draft(&self) -> &ItemDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ItemDraft {
        &mut self.draft
    }

    pub fn is_adding(&self) -> bool {
        self.show_add_form
    }

    pub fn editing(&self) -> Option<&EditingItem> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut EditingItem> {
        self.editing.as_mut()
    }

    /// Opens the add form and closes any edit in progress.
    pub fn start_adding(&mut self) {
        self.show_add_form = true;
        self.editing = None;
    }

    /// Closes the add form and clears its draft.
    pub fn cancel_adding(&mut self) {
        self.show_add_form = false;
        self.draft = ItemDraft::default();
    }

    /// Opens the edit form prefilled from the item and closes the add form.
    pub fn start_editing(&mut self, id: &ChecklistItemId) -> Result<(), ChecklistError> {
        let draft = match self.view.item(id) {
            Some(item) => ItemDraft::from_item(item),
            None => return Err(self.reject(ValidationError::not_in_view("checklist item", id))),
        };
        self.editing = Some(EditingItem {
            id: id.clone(),
            draft,
        });
        self.show_add_form = false;
        Ok(())
    }

    pub fn cancel_editing(&mut self) {
        self.editing = None;
    }

    /// Submits the add form's draft.
    pub async fn submit_new_item(&mut self) -> Result<(), ChecklistError> {
        let draft = self.draft.clone();
        self.add_item(draft).await
    }

    /// Submits the open edit form. Does nothing if no edit is open.
    pub async fn submit_edit(&mut self) -> Result<(), ChecklistError> {
        match self.editing.clone() {
            Some(EditingItem { id, draft }) => self.update_item(&id, draft).await,
            None => Ok(()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Fetching
    // ─────────────────────────────────────────────────────────────────────

    /// Replaces the view with server truth for the current season.
    ///
    /// On failure the view becomes empty with zeroed stats and the error is
    /// recorded, so a stale view is never shown without a failure signal.
    pub async fn load(&mut self) -> Result<(), ChecklistError> {
        // This fetch is authoritative, so leftovers only need clearing.
        if self.was_abandoned() {
            self.state = SyncState::Idle;
        }
        self.transition(SyncState::Loading);
        let result = self.refetch().await;
        self.transition(SyncState::Idle);
        result
    }

    /// Switches season: closes both forms and loads the new season.
    pub async fn change_season(&mut self, season: Season) -> Result<(), ChecklistError> {
        self.editing = None;
        self.show_add_form = false;
        self.view = ChecklistView::empty(season);
        self.load().await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Flips an item's completion optimistically, then tells the server.
    ///
    /// Stats are recomputed before the request is sent. If the request
    /// fails, the view is overwritten by a refetch of server truth.
    pub async fn toggle_item(&mut self, id: &ChecklistItemId) -> Result<(), ChecklistError> {
        self.begin().await;
        self.require_item(id)?;

        self.transition(SyncState::Pending);
        let optimistic = self.view.toggle_item(id);
        tracing::debug!(item_id = %id, completed = ?optimistic, "Applied optimistic toggle");

        let result = self.api.toggle_item(id).await;
        match result {
            Ok(ack) => {
                if let Some(ack) = ack {
                    self.view.apply_toggle_ack(id, &ack);
                }
                self.transition(SyncState::Idle);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(item_id = %id, error = %e, "Toggle failed, rolling back");
                let err = ChecklistError::mutation_failed(MutationKind::Toggle, e);
                self.error = Some(err.clone());

                self.transition(SyncState::Reconciling);
                // A failed refetch records its own error and empties the view.
                let _ = self.refetch().await;
                self.transition(SyncState::Idle);
                Err(err)
            }
        }
    }

    /// Creates a custom task in the current season.
    ///
    /// Empty tasks are rejected before any request. On success the draft is
    /// cleared and the view refetched; on failure the draft is kept.
    pub async fn add_item(&mut self, draft: ItemDraft) -> Result<(), ChecklistError> {
        self.begin().await;
        let new_item = match NewChecklistItem::from_draft(&draft, self.property_id.clone(), self.season()) {
            Ok(new_item) => new_item,
            Err(e) => {
                self.draft = draft;
                return Err(self.reject(e));
            }
        };

        self.transition(SyncState::Pending);
        let result = self.api.create_item(&new_item).await;
        match result {
            Ok(()) => {
                self.draft = ItemDraft::default();
                self.show_add_form = false;
                self.message = Some("Checklist item added successfully!".to_string());
                self.refetch_after_success().await;
                Ok(())
            }
            Err(e) => {
                self.draft = draft;
                Err(self.fail(MutationKind::Create, e))
            }
        }
    }

    /// Edits an item's task and description.
    ///
    /// On failure the edit form stays open holding the submitted data.
    pub async fn update_item(
        &mut self,
        id: &ChecklistItemId,
        draft: ItemDraft,
    ) -> Result<(), ChecklistError> {
        self.begin().await;
        self.require_item(id)?;
        let update = match ChecklistItemUpdate::from_draft(&draft) {
            Ok(update) => update,
            Err(e) => {
                self.keep_editing(id, draft);
                return Err(self.reject(e));
            }
        };

        self.transition(SyncState::Pending);
        let result = self.api.update_item(id, &update).await;
        match result {
            Ok(()) => {
                self.editing = None;
                self.message = Some("Checklist item updated successfully!".to_string());
                self.refetch_after_success().await;
                Ok(())
            }
            Err(e) => {
                self.keep_editing(id, draft);
                Err(self.fail(MutationKind::Update, e))
            }
        }
    }

    /// Deletes an item after the user confirms. Failures are not retried.
    pub async fn delete_item(
        &mut self,
        id: &ChecklistItemId,
    ) -> Result<MutationOutcome, ChecklistError> {
        self.begin().await;
        let task = match self.view.item(id) {
            Some(item) => item.task.clone(),
            None => return Err(self.reject(ValidationError::not_in_view("checklist item", id))),
        };

        if !self
            .confirmation
            .confirm(&ConfirmationRequest::DeleteItem { task })
            .await
        {
            return Ok(MutationOutcome::Cancelled);
        }

        self.transition(SyncState::Pending);
        let result = self.api.delete_item(id).await;
        match result {
            Ok(()) => {
                if self.editing.as_ref().map(|e| &e.id) == Some(id) {
                    self.editing = None;
                }
                self.message = Some("Checklist item deleted successfully!".to_string());
                self.refetch_after_success().await;
                Ok(MutationOutcome::Applied)
            }
            Err(e) => Err(self.fail(MutationKind::Delete, e)),
        }
    }

    /// Restores the season's default tasks after the user confirms.
    ///
    /// No optimistic change is made; the effect is only known after refetch.
    pub async fn reset_checklist(&mut self) -> Result<MutationOutcome, ChecklistError> {
        self.begin().await;
        let season = self.season();

        if !self
            .confirmation
            .confirm(&ConfirmationRequest::ResetChecklist { season })
            .await
        {
            return Ok(MutationOutcome::Cancelled);
        }

        self.transition(SyncState::Pending);
        let result = self.api.reset_checklist(&self.property_id, season).await;
        match result {
            Ok(()) => {
                self.editing = None;
                self.show_add_form = false;
                self.message = Some(format!("{} checklist has been reset to defaults.", season));
                self.refetch_after_success().await;
                Ok(MutationOutcome::Applied)
            }
            Err(e) => Err(self.fail(MutationKind::Reset, e)),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    /// Reconciles with the server if an earlier operation's future was
    /// dropped mid-flight, since its local changes may not match the server.
    async fn begin(&mut self) {
        if !self.was_abandoned() {
            return;
        }
        if self.state == SyncState::Pending {
            self.transition(SyncState::Reconciling);
        }
        // A failed refetch records its own error and empties the view.
        let _ = self.refetch().await;
        self.transition(SyncState::Idle);
    }

    fn was_abandoned(&self) -> bool {
        if self.state == SyncState::Idle {
            return false;
        }
        tracing::warn!(
            property_id = %self.property_id,
            state = ?self.state,
            "Previous checklist operation was abandoned"
        );
        true
    }

    fn transition(&mut self, next: SyncState) {
        match self.state.transition_to(next) {
            Ok(state) => self.state = state,
            Err(e) => {
                tracing::error!(error = %e, "Invalid checklist state transition");
                self.state = next;
            }
        }
    }

    async fn refetch(&mut self) -> Result<(), ChecklistError> {
        let season = self.season();
        let result = self.aggregator.fetch_checklist(&self.property_id, season).await;
        match result {
            Ok(view) => {
                self.view = view;
                Ok(())
            }
            Err(e) => {
                self.view = ChecklistView::empty(season);
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Pending -> Loading -> Idle after a mutation the server accepted.
    ///
    /// The mutation itself succeeded, so a failed refetch is only recorded.
    async fn refetch_after_success(&mut self) {
        self.transition(SyncState::Loading);
        let _ = self.refetch().await;
        self.transition(SyncState::Idle);
    }

    fn require_item(&mut self, id: &ChecklistItemId) -> Result<(), ChecklistError> {
        if self.view.item(id).is_none() {
            return Err(self.reject(ValidationError::not_in_view("checklist item", id)));
        }
        Ok(())
    }

    fn keep_editing(&mut self, id: &ChecklistItemId, draft: ItemDraft) {
        self.editing = Some(EditingItem {
            id: id.clone(),
            draft,
        });
    }

    fn reject(&mut self, e: ValidationError) -> ChecklistError {
        let err = ChecklistError::from(e);
        self.error = Some(err.clone());
        err
    }

    fn fail(&mut self, operation: MutationKind, e: ApiError) -> ChecklistError {
        tracing::error!(
            property_id = %self.property_id,
            %operation,
            error = %e,
            "Checklist mutation failed"
        );
        let err = ChecklistError::mutation_failed(operation, e);
        self.error = Some(err.clone());
        self.transition(SyncState::Idle);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryChecklistApi, Operation};
    use crate::adapters::prompt::StaticConfirmation;
    use crate::application::handlers::checklist::ErrorKind;

    fn pid() -> PropertyId {
        PropertyId::from(1)
    }

    async fn loaded(api: &Arc<InMemoryChecklistApi>, confirm: bool) -> ChecklistCoordinator {
        let mut coordinator = ChecklistCoordinator::with_season(
            api.clone(),
            Arc::new(StaticConfirmation::new(confirm)),
            pid(),
            Season::Spring,
        );
        coordinator.load().await.unwrap();
        coordinator
    }

    fn first_id(c: &ChecklistCoordinator) -> ChecklistItemId {
        c.items()[0].id.clone()
    }

    #[tokio::test]
    async fn new_coordinator_starts_empty_and_idle() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let c = ChecklistCoordinator::new(api.clone(), Arc::new(StaticConfirmation::new(true)), pid());
        assert!(c.view().is_empty());
        assert_eq!(c.state(), SyncState::Idle);
        assert_eq!(c.season(), Season::current());
        assert_eq!(api.call_count(Operation::Get), 0);
    }

    #[tokio::test]
    async fn load_populates_defaults() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let c = loaded(&api, true).await;
        assert_eq!(c.stats().total_items, 10);
        assert_eq!(c.stats().completed_items, 0);
        assert!(!c.is_loading());
    }

    #[tokio::test]
    async fn load_failure_empties_view_and_records_error() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        api.fail_next(Operation::Get, 1);

        let err = c.load().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FetchFailed);
        assert!(c.view().is_empty());
        assert_eq!(c.stats(), ChecklistStats::EMPTY);
        assert_eq!(c.error(), Some(&err));
    }

    #[tokio::test]
    async fn toggle_success_updates_stats() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        let id = first_id(&c);

        c.toggle_item(&id).await.unwrap();
        assert_eq!(c.stats().completed_items, 1);
        assert_eq!(c.stats().completion_percentage.value(), 10);
        assert!(c.view().item(&id).unwrap().completed_at.is_some());
        assert_eq!(c.state(), SyncState::Idle);
    }

    #[tokio::test]
    async fn toggle_twice_restores_original() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        let id = first_id(&c);
        let before = c.stats();

        c.toggle_item(&id).await.unwrap();
        c.toggle_item(&id).await.unwrap();
        assert_eq!(c.stats(), before);
        assert!(!c.view().item(&id).unwrap().is_completed);
    }

    #[tokio::test]
    async fn toggle_failure_rolls_back_to_server_truth() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        let id = first_id(&c);
        let before = c.view().clone();
        api.fail_next(Operation::Toggle, 1);

        let err = c.toggle_item(&id).await.unwrap_err();
        assert!(matches!(
            err,
            ChecklistError::MutationFailed { operation: MutationKind::Toggle, .. }
        ));
        assert_eq!(c.view(), &before);
        assert_eq!(c.state(), SyncState::Idle);
        // initial load + corrective refetch
        assert_eq!(api.call_count(Operation::Get), 2);
    }

    #[tokio::test]
    async fn toggle_unknown_item_is_validation_error() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        let err = c.toggle_item(&ChecklistItemId::from(999_999)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(api.call_count(Operation::Toggle), 0);
    }

    #[tokio::test]
    async fn add_empty_task_never_reaches_network() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;

        let err = c.add_item(ItemDraft::new("", "desc")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.user_message(), "Item task is required");
        assert_eq!(api.call_count(Operation::Create), 0);
        assert_eq!(c.draft().description, "desc");
    }

    #[tokio::test]
    async fn add_success_refetches_and_clears_form() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        c.start_adding();
        c.draft_mut().task = "Repaint shed".to_string();

        c.submit_new_item().await.unwrap();
        assert_eq!(c.stats().total_items, 11);
        assert!(c.items().iter().any(|i| i.task == "Repaint shed" && !i.is_default));
        assert_eq!(c.draft(), &ItemDraft::default());
        assert!(!c.is_adding());
        assert_eq!(c.message(), Some("Checklist item added successfully!"));
    }

    #[tokio::test]
    async fn add_failure_preserves_draft() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        c.start_adding();
        api.fail_next(Operation::Create, 1);

        let err = c.add_item(ItemDraft::new("Repaint shed", "")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MutationFailed);
        assert_eq!(c.draft().task, "Repaint shed");
        assert!(c.is_adding());
        assert_eq!(c.stats().total_items, 10);
        assert!(!c.is_loading());
    }

    #[tokio::test]
    async fn update_failure_keeps_edit_form_open() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        let id = first_id(&c);
        c.start_editing(&id).unwrap();
        c.editing_mut().unwrap().draft.task = "Renamed".to_string();
        api.fail_next(Operation::Update, 1);

        assert!(c.submit_edit().await.is_err());
        let editing = c.editing().unwrap();
        assert_eq!(editing.id, id);
        assert_eq!(editing.draft.task, "Renamed");

        c.submit_edit().await.unwrap();
        assert!(c.editing().is_none());
        let item = c.view().item(&id).unwrap();
        assert_eq!(item.task, "Renamed");
        assert!(!item.is_default);
    }

    #[tokio::test]
    async fn update_with_blank_task_is_rejected_locally() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        let id = first_id(&c);

        let err = c.update_item(&id, ItemDraft::new("  ", "")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(api.call_count(Operation::Update), 0);
        assert!(c.editing().is_some());
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, false).await;
        let id = first_id(&c);

        assert_eq!(c.delete_item(&id).await.unwrap(), MutationOutcome::Cancelled);
        assert_eq!(api.call_count(Operation::Delete), 0);
        assert_eq!(c.stats().total_items, 10);
    }

    #[tokio::test]
    async fn delete_confirmed_removes_item() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        let id = first_id(&c);

        assert_eq!(c.delete_item(&id).await.unwrap(), MutationOutcome::Applied);
        assert!(c.view().item(&id).is_none());
        assert_eq!(c.stats().total_items, 9);
    }

    #[tokio::test]
    async fn delete_failure_is_not_retried() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        let id = first_id(&c);
        api.fail_next(Operation::Delete, 1);

        assert!(c.delete_item(&id).await.is_err());
        assert_eq!(api.call_count(Operation::Delete), 1);
        assert!(c.view().item(&id).is_some());
    }

    #[tokio::test]
    async fn reset_restores_defaults() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        let id = first_id(&c);
        c.toggle_item(&id).await.unwrap();
        c.add_item(ItemDraft::new("Custom", "")).await.unwrap();

        assert_eq!(c.reset_checklist().await.unwrap(), MutationOutcome::Applied);
        assert_eq!(c.stats().total_items, 10);
        assert_eq!(c.stats().completed_items, 0);
        assert!(c.items().iter().all(|i| i.is_default));
        assert_eq!(c.message(), Some("Spring checklist has been reset to defaults."));
    }

    #[tokio::test]
    async fn reset_failure_leaves_items_untouched() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        c.add_item(ItemDraft::new("Custom", "")).await.unwrap();
        let before = c.view().clone();
        api.fail_next(Operation::Reset, 1);

        let err = c.reset_checklist().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MutationFailed);
        assert_eq!(c.view(), &before);
    }

    #[tokio::test]
    async fn reset_cancelled_sends_nothing() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, false).await;
        assert_eq!(c.reset_checklist().await.unwrap(), MutationOutcome::Cancelled);
        assert_eq!(api.call_count(Operation::Reset), 0);
    }

    #[tokio::test]
    async fn change_season_closes_forms_and_loads() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        let id = first_id(&c);
        c.start_editing(&id).unwrap();

        c.change_season(Season::Winter).await.unwrap();
        assert_eq!(c.season(), Season::Winter);
        assert!(c.editing().is_none());
        assert!(!c.is_adding());
        assert!(c.items().iter().all(|i| i.season == Season::Winter));
    }

    #[tokio::test]
    async fn starting_one_form_closes_the_other() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        let id = first_id(&c);

        c.start_adding();
        c.start_editing(&id).unwrap();
        assert!(!c.is_adding());
        c.start_adding();
        assert!(c.editing().is_none());
        c.cancel_adding();
        assert!(!c.is_adding());
    }

    #[tokio::test]
    async fn errors_and_messages_are_dismissible() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        let _ = c.add_item(ItemDraft::default()).await;
        assert!(c.error().is_some());
        c.dismiss_error();
        assert!(c.error().is_none());

        c.add_item(ItemDraft::new("x", "")).await.unwrap();
        c.dismiss_message();
        assert!(c.message().is_none());
    }

    #[tokio::test]
    async fn abandoned_operation_does_not_wedge_the_view() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        let id = first_id(&c);

        // Simulate teardown mid-flight: the future is dropped after the
        // optimistic change was applied.
        api.pause();
        {
            let fut = c.toggle_item(&id);
            futures::pin_mut!(fut);
            assert!(futures::poll!(fut.as_mut()).is_pending());
        }
        api.resume();
        assert_eq!(c.state(), SyncState::Pending);

        c.load().await.unwrap();
        assert_eq!(c.state(), SyncState::Idle);
        assert_eq!(c.stats().completed_items, 0);
    }

    #[tokio::test]
    async fn toggle_after_abandoned_toggle_matches_server() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        let first = c.items()[0].id.clone();
        let second = c.items()[1].id.clone();

        api.pause();
        {
            let fut = c.toggle_item(&first);
            futures::pin_mut!(fut);
            assert!(futures::poll!(fut.as_mut()).is_pending());
        }
        api.resume();
        assert!(c.view().item(&first).unwrap().is_completed);

        c.toggle_item(&second).await.unwrap();

        let server_completed = api
            .items(&pid(), Season::Spring)
            .iter()
            .filter(|i| i.is_completed)
            .count();
        assert_eq!(c.stats().completed_items, server_completed);
        assert!(!c.view().item(&first).unwrap().is_completed);
        assert!(c.view().item(&second).unwrap().is_completed);
        assert_eq!(c.state(), SyncState::Idle);
        // initial load + reconciling refetch
        assert_eq!(api.call_count(Operation::Get), 2);
    }

    #[tokio::test]
    async fn toggle_without_ack_keeps_optimistic_shape() {
        let api = Arc::new(InMemoryChecklistApi::new().without_toggle_body());
        let mut c = loaded(&api, true).await;
        let id = first_id(&c);

        c.toggle_item(&id).await.unwrap();
        let item = c.view().item(&id).unwrap();
        assert!(item.is_completed);
        assert!(item.completed_at.is_none());
    }

    #[tokio::test]
    async fn unauthorized_surfaces_as_mutation_failed() {
        let api = Arc::new(InMemoryChecklistApi::new());
        let mut c = loaded(&api, true).await;
        api.fail_next_with(Operation::Create, 1, ApiError::Unauthorized);

        let err = c.add_item(ItemDraft::new("x", "")).await.unwrap_err();
        assert!(matches!(
            err,
            ChecklistError::MutationFailed { source: ApiError::Unauthorized, .. }
        ));
    }
}
