//! One table screen: its own copy of a collection plus the view state around it.
//!
//! The screen owns the rows it fetched, the criteria, sort, page and selection,
//! and the toast queue. Fetches are ticketed: a result is applied only if no
//! newer fetch was started since and the screen is still mounted.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crate::backend::{BulkOutcome, Listing, MockBackend};
use crate::error::ConsoleError;
use crate::forms::{submit_create, submit_edit, EditForm};
use crate::notification::{ToastKind, ToastQueue};
use crate::store::Entity;
use crate::types::Config;
use crate::view::{
    paginate, Criteria, DateRange, FilterValue, HeaderState, HiddenSelectionPolicy, Page,
    PageSlice, SelectionSet, SortState, ViewProjection,
};

/// Shared between a screen and the fetches it started.
#[derive(Debug, Clone)]
struct FetchGuard {
    generation: Arc<AtomicU64>,
    mounted: Arc<AtomicBool>,
}

impl FetchGuard {
    fn new() -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }
}

/// Proof that a fetch was started. Cheap to clone and `Send`, so it can travel
/// with a spawned task.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    guard: FetchGuard,
}

impl FetchTicket {
    /// True while no newer fetch has started and the screen is mounted.
    pub fn is_current(&self) -> bool {
        self.guard.mounted.load(Ordering::Acquire)
            && self.guard.generation.load(Ordering::Acquire) == self.generation
    }
}

pub struct Screen<T: Entity> {
    rows: Vec<T>,
    revision: u64,
    loaded: bool,
    criteria: Criteria,
    sort: Option<SortState>,
    page: Page,
    selection: SelectionSet,
    projection: ViewProjection,
    toasts: ToastQueue,
    guard: FetchGuard,
    bulk_actions_allowed: bool,
}

impl<T: Entity> Screen<T> {
    /// `criteria` names the fields the search box covers.
    pub fn new(criteria: Criteria, page_size: usize, policy: HiddenSelectionPolicy) -> Self {
        Self {
            rows: Vec::new(),
            revision: 0,
            loaded: false,
            criteria,
            sort: None,
            page: Page::first(page_size),
            selection: SelectionSet::new(policy),
            projection: ViewProjection::new(),
            toasts: ToastQueue::new(),
            guard: FetchGuard::new(),
            bulk_actions_allowed: true,
        }
    }

    pub fn from_config(criteria: Criteria, config: &Config) -> Self {
        Self::new(criteria, config.page_size, config.selection_policy)
    }

    /// Whether the role gate lets this session see bulk actions.
    pub fn with_bulk_actions(mut self, allowed: bool) -> Self {
        self.bulk_actions_allowed = allowed;
        self
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }

    /// Stop applying results of fetches that are still in flight.
    pub fn unmount(&mut self) {
        self.guard.mounted.store(false, Ordering::Release);
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        let generation = self.guard.generation.fetch_add(1, Ordering::AcqRel) + 1;
        FetchTicket {
            generation,
            guard: self.guard.clone(),
        }
    }

    /// Apply a fetch result. Returns false if the ticket went stale and the
    /// result was dropped.
    pub fn finish_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Listing<T>, ConsoleError>,
    ) -> bool {
        if !ticket.is_current() {
            log::debug!(
                "Dropping stale {} fetch (generation {})",
                T::KIND,
                ticket.generation
            );
            return false;
        }
        match result {
            Ok(listing) => {
                self.rows = listing.rows;
                self.touch();
                self.loaded = true;
                self.selection
                    .retain_existing(self.rows.iter().map(|r| r.record_id()));
            }
            Err(e) => {
                self.toasts.from_error(&format!("Could not load {}", T::KIND), &e);
            }
        }
        true
    }

    /// Fetch the collection and apply it.
    pub async fn load(&mut self, backend: &MockBackend) -> bool {
        let ticket = self.begin_fetch();
        let result = backend.list::<T>().await;
        self.finish_fetch(&ticket, result)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// The filtered, sorted rows, memoized on rows/criteria/sort.
    pub fn visible(&mut self) -> Vec<&T> {
        self.projection
            .get(&self.rows, self.revision, &self.criteria, self.sort.as_ref())
    }

    pub fn visible_ids(&mut self) -> Vec<String> {
        self.visible()
            .into_iter()
            .map(|r| r.record_id().to_string())
            .collect()
    }

    /// Current page of the projection. Clamps the page index if the
    /// projection shrank underneath it.
    pub fn page_rows(&mut self) -> PageSlice<T> {
        let visible: Vec<T> = self.visible().into_iter().cloned().collect();
        let slice = paginate(&visible, self.page);
        self.page.index = slice.page_index;
        slice
    }

    pub fn set_page(&mut self, index: usize) {
        self.page.index = index;
    }

    fn criteria_changed(&mut self) {
        self.page.index = 0;
        let visible = self.visible_ids();
        self.selection
            .on_view_changed(visible.iter().map(String::as_str));
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.criteria.search_text = text.into();
        self.criteria_changed();
    }

    pub fn set_filter(&mut self, field: &str, value: impl Into<FilterValue>) {
        self.criteria
            .equality_filters
            .insert(field.to_string(), value.into());
        self.criteria_changed();
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.criteria.date_range = range;
        self.criteria_changed();
    }

    /// Same key flips direction; a new key starts ascending.
    pub fn toggle_sort(&mut self, key: &str) {
        self.sort = Some(SortState::toggle(self.sort.as_ref(), key));
    }

    pub fn toggle_row(&mut self, id: &str) {
        self.selection.toggle(id);
    }

    pub fn header_state(&mut self) -> HeaderState {
        let visible = self.visible_ids();
        self.selection
            .header_state(visible.iter().map(String::as_str))
    }

    /// Header checkbox click: select every visible row, or clear them if all
    /// are already selected.
    pub fn toggle_header(&mut self) {
        let visible = self.visible_ids();
        let ids: Vec<&str> = visible.iter().map(String::as_str).collect();
        self.selection.toggle_header(&ids);
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.ids().map(String::from).collect()
    }

    pub fn show_bulk_actions(&self) -> bool {
        self.bulk_actions_allowed && !self.selection.is_empty()
    }

    /// Delete every selected row, one call per id. Succeeded rows leave the
    /// screen and the selection; failed rows stay, still selected.
    pub async fn bulk_delete_selected(&mut self, backend: &MockBackend) -> BulkOutcome {
        let ids = self.selected_ids();
        if ids.is_empty() {
            return BulkOutcome::default();
        }
        let outcome = backend.bulk_delete::<T>(&ids).await;

        if !outcome.succeeded.is_empty() {
            self.rows
                .retain(|r| !outcome.succeeded.iter().any(|id| id == r.record_id()));
            for id in &outcome.succeeded {
                self.selection.set(id, false);
            }
            self.touch();
        }

        let summary = outcome.summary("deleted");
        if outcome.is_complete_success() {
            self.toasts.success(summary);
        } else {
            self.toasts.push(ToastKind::Error, "Some deletions failed", summary);
        }
        outcome
    }

    /// Validate `form`, save it over row `id` and update the local copy.
    ///
    /// Validation errors come back as `Err` without a toast; an unchanged
    /// form never calls the backend.
    pub async fn save_edit<F>(
        &mut self,
        backend: &MockBackend,
        id: &str,
        form: &F,
    ) -> Result<T, ConsoleError>
    where
        F: EditForm<Record = T>,
        T: PartialEq,
    {
        let pos = self
            .rows
            .iter()
            .position(|r| r.record_id() == id)
            .ok_or_else(|| ConsoleError::NotFound {
                entity: T::KIND,
                id: id.to_string(),
            })?;
        let base = self.rows[pos].clone();
        let next = submit_edit(form, &base, &crate::util::today())?;
        if next == base {
            return Ok(base);
        }
        match backend.update(next).await {
            Ok(saved) => {
                // Rows may have been reloaded while the save was in flight.
                if let Some(slot) = self.rows.iter_mut().find(|r| r.record_id() == id) {
                    *slot = saved.clone();
                }
                self.touch();
                self.toasts.success(format!("{} saved", T::KIND));
                Ok(saved)
            }
            Err(e) => {
                self.toasts.from_error("Save failed", &e);
                Err(e)
            }
        }
    }

    /// Validate `form`, create the record and put it at the top of the list.
    pub async fn create<F>(
        &mut self,
        backend: &MockBackend,
        form: &F,
        id_prefix: &str,
    ) -> Result<T, ConsoleError>
    where
        F: EditForm<Record = T>,
    {
        let record = submit_create(
            form,
            crate::util::new_record_id(id_prefix),
            &crate::util::today(),
        )?;
        match backend.create(record).await {
            Ok(created) => {
                self.rows.insert(0, created.clone());
                self.touch();
                self.toasts.success(format!("{} created", T::KIND));
                Ok(created)
            }
            Err(e) => {
                self.toasts.from_error("Create failed", &e);
                Err(e)
            }
        }
    }
}

impl<T: Entity> Drop for Screen<T> {
    fn drop(&mut self) {
        self.guard.mounted.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FailurePlan, Simulation};
    use crate::entities::{Company, Lead, Ticket, TicketStatus};
    use crate::forms::{CompanyForm, TicketForm};
    use crate::store::MockStore;

    fn backend(plan: FailurePlan) -> MockBackend {
        MockBackend::new(MockStore::seeded(), Simulation::instant().with_plan(plan))
    }

    fn ticket_screen() -> Screen<Ticket> {
        Screen::new(
            Criteria::searching(["subject", "company"]),
            10,
            HiddenSelectionPolicy::RetainHidden,
        )
    }

    #[tokio::test]
    async fn test_open_tickets_with_all_priorities() {
        let backend = backend(FailurePlan::none());
        let mut screen = ticket_screen();
        assert!(screen.load(&backend).await);
        screen.set_filter("status", "Open");
        screen.set_filter("priority", FilterValue::All);
        assert_eq!(screen.visible_ids(), vec!["TCK-001", "TCK-004", "TCK-007"]);

        screen.toggle_sort("createdAt");
        assert_eq!(screen.visible_ids(), vec!["TCK-001", "TCK-004", "TCK-007"]);
        screen.toggle_sort("createdAt");
        assert_eq!(screen.visible_ids(), vec!["TCK-007", "TCK-004", "TCK-001"]);
    }

    #[tokio::test]
    async fn test_stale_fetch_is_dropped() {
        let backend = backend(FailurePlan::none());
        let mut screen = ticket_screen();
        let first = screen.begin_fetch();
        let second = screen.begin_fetch();
        let result = backend.list::<Ticket>().await;
        assert!(!screen.finish_fetch(&first, result));
        assert!(!screen.is_loaded());
        let result = backend.list::<Ticket>().await;
        assert!(screen.finish_fetch(&second, result));
        assert_eq!(screen.rows().len(), 8);
    }

    #[tokio::test]
    async fn test_unmounted_screen_ignores_result() {
        let backend = backend(FailurePlan::none());
        let mut screen = ticket_screen();
        let ticket = screen.begin_fetch();
        screen.unmount();
        let result = backend.list::<Ticket>().await;
        assert!(!screen.finish_fetch(&ticket, result));
        assert!(screen.rows().is_empty());
    }

    #[tokio::test]
    async fn test_ticket_outlives_dropped_screen() {
        let backend = backend(FailurePlan::none());
        let mut screen = ticket_screen();
        let ticket = screen.begin_fetch();
        let task = tokio::spawn({
            let backend = backend.clone();
            async move {
                let _ = backend.list::<Ticket>().await;
                ticket.is_current()
            }
        });
        drop(screen);
        assert!(!task.await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_load_toasts_and_keeps_rows() {
        let backend = backend(FailurePlan::fail_everything());
        let mut screen = ticket_screen();
        assert!(screen.load(&backend).await);
        assert!(!screen.is_loaded());
        assert_eq!(screen.toasts().len(), 1);
        assert_eq!(screen.toasts().toasts()[0].kind, ToastKind::Error);
    }

    #[tokio::test]
    async fn test_widening_filter_does_not_select_new_rows() {
        let backend = backend(FailurePlan::none());
        let mut screen = ticket_screen();
        screen.load(&backend).await;
        screen.set_filter("status", "Open");
        screen.toggle_header();
        assert_eq!(screen.header_state(), HeaderState::Checked);
        assert_eq!(screen.selected_ids().len(), 3);

        screen.set_filter("status", FilterValue::All);
        assert_eq!(screen.visible_ids().len(), 8);
        assert_eq!(screen.selected_ids().len(), 3);
        assert_eq!(screen.header_state(), HeaderState::Indeterminate);
    }

    #[tokio::test]
    async fn test_prune_policy_drops_hidden_selection() {
        let backend = backend(FailurePlan::none());
        let mut screen: Screen<Ticket> = Screen::new(
            Criteria::searching(["subject"]),
            10,
            HiddenSelectionPolicy::PruneHidden,
        );
        screen.load(&backend).await;
        screen.toggle_row("TCK-001");
        screen.toggle_row("TCK-002");
        screen.set_filter("status", "Open");
        assert_eq!(screen.selected_ids(), vec!["TCK-001"]);
    }

    #[tokio::test]
    async fn test_bulk_delete_keeps_failed_rows() {
        let backend = backend(FailurePlan::fail_ids(["ld-003"]));
        let mut screen: Screen<Lead> = Screen::new(
            Criteria::searching(["name", "company"]),
            10,
            HiddenSelectionPolicy::RetainHidden,
        );
        screen.load(&backend).await;
        for id in ["ld-001", "ld-003", "ld-004"] {
            screen.toggle_row(id);
        }
        assert!(screen.show_bulk_actions());
        let outcome = screen.bulk_delete_selected(&backend).await;
        assert_eq!(outcome.succeeded.len(), 2);
        assert_eq!(outcome.failed.len(), 1);

        let ids = screen.visible_ids();
        assert_eq!(ids.len(), 6);
        assert!(ids.contains(&"ld-003".to_string()));
        assert!(!ids.contains(&"ld-001".to_string()));
        assert_eq!(screen.selected_ids(), vec!["ld-003"]);
        let toast = &screen.toasts().toasts()[0];
        assert_eq!(toast.body, "2 deleted, 1 failed");
    }

    #[tokio::test]
    async fn test_bulk_actions_hidden_for_gated_role() {
        let mut screen = ticket_screen().with_bulk_actions(false);
        screen.toggle_row("TCK-001");
        assert!(!screen.show_bulk_actions());
    }

    #[tokio::test]
    async fn test_noop_edit_skips_backend() {
        // Every call would fail, so success proves no call was made.
        let backend_ok = backend(FailurePlan::none());
        let mut screen: Screen<Company> = Screen::new(
            Criteria::searching(["name", "industry"]),
            10,
            HiddenSelectionPolicy::RetainHidden,
        );
        screen.load(&backend_ok).await;
        let failing = MockBackend::new(
            MockStore::seeded(),
            Simulation::instant().with_plan(FailurePlan::fail_everything()),
        );
        let original = screen.rows()[0].clone();
        let form = CompanyForm::from_record(&original);
        let saved = screen.save_edit(&failing, &original.id, &form).await.unwrap();
        assert_eq!(saved, original);
        assert_eq!(screen.rows()[0], original);
    }

    #[tokio::test]
    async fn test_save_edit_updates_local_copy() {
        let backend = backend(FailurePlan::none());
        let mut screen = ticket_screen();
        screen.load(&backend).await;
        screen.set_filter("status", "Open");
        let ticket = screen.rows()[0].clone();
        let mut form = TicketForm::from_record(&ticket);
        form.status = TicketStatus::Resolved;
        screen.save_edit(&backend, &ticket.id, &form).await.unwrap();
        assert_eq!(screen.visible_ids(), vec!["TCK-004", "TCK-007"]);
        assert_eq!(
            backend.snapshot().tickets.get(&ticket.id).unwrap().status,
            TicketStatus::Resolved
        );
    }

    #[tokio::test]
    async fn test_failed_save_leaves_row_unchanged() {
        let backend = backend(FailurePlan::fail_ids(["TCK-001"]));
        let mut screen = ticket_screen();
        screen.load(&backend).await;
        let ticket = screen.rows()[0].clone();
        let mut form = TicketForm::from_record(&ticket);
        form.subject = "Renamed".into();
        assert!(screen.save_edit(&backend, &ticket.id, &form).await.is_err());
        assert_eq!(screen.rows()[0], ticket);
        assert_eq!(screen.toasts().len(), 1);
    }

    #[tokio::test]
    async fn test_page_clamps_when_filter_shrinks() {
        let backend = backend(FailurePlan::none());
        let mut screen: Screen<Ticket> = Screen::new(
            Criteria::searching(["subject"]),
            3,
            HiddenSelectionPolicy::RetainHidden,
        );
        screen.load(&backend).await;
        screen.set_page(2);
        let page = screen.page_rows();
        assert_eq!((page.page_index, page.page_count, page.rows.len()), (2, 3, 2));
        screen.set_page(9);
        assert_eq!(screen.page_rows().page_index, 2);
        screen.set_search("sso");
        let page = screen.page_rows();
        assert_eq!((page.page_index, page.total), (0, 1));
    }
}
