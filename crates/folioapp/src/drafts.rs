//! # Draft Persistence
//!
//! [`DraftStore`] keeps in-progress form values across reloads without the user
//! ever pressing "save".
//!
//! ## Debounced Autosave
//!
//! Every qualifying edit calls [`DraftStore::schedule_save`], which (re)arms a
//! per-form timer for the quiet period (2s by default). The snapshot taken by
//! the latest call replaces any pending one, so a burst of keystrokes ends in a
//! single write holding the final values. Timers are keyed by form id; typing
//! in one form never delays another form's save.
//!
//! The store does not own an event loop. The host asks for
//! [`DraftStore::next_deadline`], waits, then calls [`DraftStore::run_due`].
//! A save that has started writing cannot be cancelled.
//!
//! ## Failure Semantics
//!
//! Both directions are best-effort:
//! - A write that fails (store full or unavailable) is logged and dropped. No
//!   notice is shown and the in-memory form is untouched.
//! - A record that cannot be decoded is logged and treated as absent.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::model::{draft_key, Draft, Form, DRAFT_KEY_PREFIX};
use crate::notify::{NoticeKind, Notifier};
use crate::store::KeyValueStore;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(2000);

pub const SAVED_NOTICE: &str = "Draft saved automatically";
pub const RESTORED_NOTICE: &str = "Draft restored";

#[derive(Debug, Clone)]
struct PendingSave {
    due: Instant,
    draft: Draft,
}

pub struct DraftStore<B: KeyValueStore, C: Clock = SystemClock> {
    backend: B,
    clock: C,
    quiet_period: Duration,
    pending: HashMap<String, PendingSave>,
}

impl<B: KeyValueStore> DraftStore<B, SystemClock> {
    pub fn new(backend: B) -> Self {
        Self::with_clock(backend, SystemClock)
    }
}

impl<B: KeyValueStore, C: Clock> DraftStore<B, C> {
    pub fn with_clock(backend: B, clock: C) -> Self {
        Self {
            backend,
            clock,
            quiet_period: DEFAULT_QUIET_PERIOD,
            pending: HashMap::new(),
        }
    }

    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Arms (or re-arms) the autosave timer for `form`.
    pub fn schedule_save(&mut self, form: &Form) {
        let due = self.clock.deadline_after(self.quiet_period);
        tracing::debug!(form = %form.id, "autosave rescheduled");
        self.pending.insert(
            form.id.clone(),
            PendingSave {
                due,
                draft: Draft::from_form(form),
            },
        );
    }

    pub fn is_pending(&self, form_id: &str) -> bool {
        self.pending.contains_key(form_id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Earliest deadline among pending saves.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.due).min()
    }

    /// Performs every pending save whose quiet period has elapsed.
    /// Returns the ids of forms whose draft was written.
    pub fn run_due<N: Notifier>(&mut self, notifier: &mut N) -> Vec<String> {
        let now = self.clock.now();
        let mut due: Vec<PendingSave> = Vec::new();
        self.pending.retain(|_, pending| {
            if pending.due <= now {
                due.push(pending.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|p| p.due);

        due.into_iter()
            .filter(|p| self.write(&p.draft, notifier))
            .map(|p| p.draft.form_id)
            .collect()
    }

    /// Drops the pending save for `form_id`. Returns true if one was pending.
    pub fn cancel(&mut self, form_id: &str) -> bool {
        self.pending.remove(form_id).is_some()
    }

    /// Drops every pending save (page teardown).
    pub fn teardown(&mut self) {
        if !self.pending.is_empty() {
            tracing::debug!(count = self.pending.len(), "dropping pending autosaves");
        }
        self.pending.clear();
    }

    /// Writes the form's current values immediately.
    /// Returns false if the write did not happen; the failure is only logged.
    pub fn save<N: Notifier>(&mut self, form: &Form, notifier: &mut N) -> bool {
        self.write(&Draft::from_form(form), notifier)
    }

    fn write<N: Notifier>(&self, draft: &Draft, notifier: &mut N) -> bool {
        match self.try_write(draft) {
            Ok(()) => {
                tracing::debug!(key = %draft.key(), fields = draft.values.len(), "draft saved");
                notifier.notify(SAVED_NOTICE, NoticeKind::Success);
                true
            }
            Err(e) => {
                tracing::warn!(key = %draft.key(), error = %e, "draft not saved");
                false
            }
        }
    }

    fn try_write(&self, draft: &Draft) -> Result<()> {
        let encoded = draft.encode()?;
        self.backend.set(&draft.key(), &encoded)
    }

    /// Restores the stored draft into `form`. Returns how many fields were assigned.
    pub fn load<N: Notifier>(&mut self, form: &mut Form, notifier: &mut N) -> usize {
        let Some(draft) = self.stored(&form.id) else {
            return 0;
        };
        let applied = draft.apply_to(form);
        tracing::debug!(key = %draft.key(), applied, "draft restored");
        notifier.notify(RESTORED_NOTICE, NoticeKind::Info);
        applied
    }

    /// Reads the stored draft without applying it. Unreadable records are `None`.
    pub fn stored(&self, form_id: &str) -> Option<Draft> {
        let key = draft_key(form_id);
        let raw = match self.backend.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "draft storage unavailable");
                return None;
            }
        };
        match Draft::decode(form_id, &raw) {
            Ok(draft) => Some(draft),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "ignoring unreadable draft");
                None
            }
        }
    }

    /// Removes the stored draft for `form_id` and any pending save for it.
    pub fn discard(&mut self, form_id: &str) -> Result<()> {
        self.cancel(form_id);
        self.backend.remove(&draft_key(form_id))
    }

    /// Ids of every form with a stored draft.
    pub fn stored_form_ids(&self) -> Result<Vec<String>> {
        Ok(self
            .backend
            .keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(DRAFT_KEY_PREFIX).map(str::to_string))
            .collect())
    }
}
