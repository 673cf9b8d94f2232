//! # API Facade
//!
//! The API layer is a **thin facade** over the domain modules. It is the single
//! entry point a host uses, whether that host is a browser binding, a test or
//! the `folio` CLI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns the session**: registered forms, the draft store and the notice board
//! - **Routes events** to the right [`FormController`] by form id
//! - **Wires autosave**: an input on an autosave form schedules that form's draft
//! - **Tracks page state**: the theme, and the navbar's scroll direction
//!
//! ## What the API Does NOT Do
//!
//! - **Validation rules**: those live in [`crate::validation`]
//! - **UI mutation**: field state goes out through the caller's [`FormView`]
//! - **Waiting**: the host polls [`FolioApi::next_deadline`] and calls [`FolioApi::tick`]
//!
//! ## Generic Over Storage and Time
//!
//! `FolioApi<B: KeyValueStore, C: Clock>`:
//! - Production: `FolioApi<FsBackend, SystemClock>`
//! - Testing: `FolioApi<MemBackend, ManualClock>`

use std::collections::BTreeMap;
use std::time::Instant;

use crate::clock::{Clock, SystemClock};
use crate::config::FolioConfig;
use crate::drafts::DraftStore;
use crate::error::{FolioError, Result};
use crate::form::{FormController, FormView, InputOutcome, SubmitOutcome};
use crate::model::{Draft, Form};
use crate::notify::{Notice, NoticeBoard, NoticeKind, Notifier};
use crate::scroll::{self, NavbarState, NavbarTracker};
use crate::search::{filter_projects, ProjectCard, SearchResult};
use crate::store::KeyValueStore;
use crate::theme::{self, Theme};
use crate::upload::{check_image_upload, UploadError};
use crate::validation::ValidationError;

pub const LINK_COPIED_NOTICE: &str = "Link copied!";

pub struct FolioApi<B: KeyValueStore, C: Clock + Clone = SystemClock> {
    drafts: DraftStore<B, C>,
    notices: NoticeBoard<C>,
    forms: BTreeMap<String, FormController>,
    navbar: NavbarTracker,
    max_upload_bytes: u64,
}

impl<B: KeyValueStore> FolioApi<B, SystemClock> {
    pub fn new(backend: B, config: &FolioConfig) -> Self {
        Self::with_clock(backend, SystemClock, config)
    }
}

impl<B: KeyValueStore, C: Clock + Clone> FolioApi<B, C> {
    pub fn with_clock(backend: B, clock: C, config: &FolioConfig) -> Self {
        Self {
            drafts: DraftStore::with_clock(backend, clock.clone())
                .with_quiet_period(config.quiet_period()),
            notices: NoticeBoard::with_ttl(clock, config.notice_ttl()),
            forms: BTreeMap::new(),
            navbar: NavbarTracker::default(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    pub fn backend(&self) -> &B {
        self.drafts.backend()
    }

    // --- Forms ---

    /// Registers a rendered form. Autosave forms get their draft restored.
    /// Returns how many fields were restored.
    pub fn register_form(&mut self, mut form: Form) -> usize {
        let restored = if form.autosave {
            self.drafts.load(&mut form, &mut self.notices)
        } else {
            0
        };
        self.forms
            .insert(form.id.clone(), FormController::new(form));
        restored
    }

    pub fn form(&self, form_id: &str) -> Result<&Form> {
        self.forms
            .get(form_id)
            .map(FormController::form)
            .ok_or_else(|| FolioError::FormNotFound(form_id.to_string()))
    }

    fn controller_mut(&mut self, form_id: &str) -> Result<&mut FormController> {
        self.forms
            .get_mut(form_id)
            .ok_or_else(|| FolioError::FormNotFound(form_id.to_string()))
    }

    pub fn field_blur<V: FormView>(
        &mut self,
        form_id: &str,
        field: &str,
        view: &mut V,
    ) -> Result<std::result::Result<(), ValidationError>> {
        self.controller_mut(form_id)?.on_field_blur(field, view)
    }

    pub fn field_input<V: FormView>(
        &mut self,
        form_id: &str,
        field: &str,
        value: &str,
        view: &mut V,
    ) -> Result<InputOutcome> {
        let controller = self
            .forms
            .get_mut(form_id)
            .ok_or_else(|| FolioError::FormNotFound(form_id.to_string()))?;
        let outcome = controller.on_field_input(field, value, view)?;
        if outcome.autosave {
            self.drafts.schedule_save(controller.form());
        }
        Ok(outcome)
    }

    pub fn submit<V: FormView>(&mut self, form_id: &str, view: &mut V) -> Result<SubmitOutcome> {
        Ok(self.controller_mut(form_id)?.on_form_submit(view))
    }

    /// Forgets every form and drops pending autosaves.
    pub fn teardown(&mut self) {
        self.drafts.teardown();
        self.forms.clear();
    }

    // --- Drafts ---

    pub fn next_deadline(&self) -> Option<Instant> {
        self.drafts.next_deadline()
    }

    pub fn has_pending_saves(&self) -> bool {
        self.drafts.pending_count() > 0
    }

    /// Timer expiry: writes due drafts and expires stale notices.
    pub fn tick(&mut self) -> Vec<String> {
        let saved = self.drafts.run_due(&mut self.notices);
        self.notices.dismiss_expired();
        saved
    }

    pub fn stored_draft(&self, form_id: &str) -> Option<Draft> {
        self.drafts.stored(form_id)
    }

    pub fn stored_draft_ids(&self) -> Result<Vec<String>> {
        self.drafts.stored_form_ids()
    }

    pub fn discard_draft(&mut self, form_id: &str) -> Result<()> {
        self.drafts.discard(form_id)
    }

    // --- Notices ---

    pub fn notify(&mut self, message: &str, kind: NoticeKind) {
        self.notices.notify(message, kind);
    }

    pub fn link_copied(&mut self) {
        self.notify(LINK_COPIED_NOTICE, NoticeKind::Info);
    }

    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.current()
    }

    pub fn notice_history(&self) -> &[Notice] {
        self.notices.history()
    }

    /// Drains recent notices so long-running hosts do not accumulate them.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take_history()
    }

    // --- Preferences and page helpers ---

    pub fn theme(&self) -> Theme {
        theme::load_theme(self.drafts.backend())
    }

    pub fn toggle_theme(&mut self) -> Theme {
        theme::toggle_theme(self.drafts.backend())
    }

    pub fn search_projects(&self, cards: &[ProjectCard], term: &str) -> SearchResult {
        filter_projects(cards, term)
    }

    pub fn check_upload(&self, size: u64, mime: &str) -> std::result::Result<(), UploadError> {
        check_image_upload(size, mime, self.max_upload_bytes)
    }

    pub fn on_scroll(&mut self, top: f64) -> NavbarState {
        self.navbar.on_scroll(top)
    }

    pub fn reading_progress(&self, scrolled: f64, document_height: f64, viewport_height: f64) -> f64 {
        scroll::reading_progress(scrolled, document_height, viewport_height)
    }
}
