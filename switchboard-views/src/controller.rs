//! Draft/applied filter state machine.
//!
//! The controller owns two independent copies of the filter fields: the
//! *draft* the user is editing and the *applied* snapshot last sent to the
//! engine. Text fields are deferred (apply on button/Enter) so partially
//! typed search text never hits the network; dropdowns and date pickers are
//! instant and apply without discarding an in-progress text edit.
//!
//! Every dispatch carries a monotonically increasing sequence number. Only
//! the completion matching the most recently issued dispatch may update
//! rendered state; older in-flight calls that resolve late are discarded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use switchboard_client::ClientError;
use switchboard_types::{FilterValue, ListResult, QuerySpec, Sort, SortOrder, DEFAULT_PAGE_SIZE};
use tracing::{debug, warn};

/// When a field edit triggers a list call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyMode {
    /// Dispatch on every edit (dropdowns, date ranges).
    Instant,
    /// Wait for an explicit apply (search text).
    Deferred,
}

/// One configured filter field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub apply: ApplyMode,
}

impl FieldSpec {
    pub fn instant(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            apply: ApplyMode::Instant,
        }
    }

    pub fn deferred(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            apply: ApplyMode::Deferred,
        }
    }
}

/// Per-view configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// REST collection this view lists.
    pub resource: String,
    /// Rows per page.
    pub page_size: u32,
    /// Filter fields, in the order they appear in specs and URLs.
    pub fields: Vec<FieldSpec>,
    /// Whether applied state mirrors into the navigable URL.
    pub sync_url: bool,
}

impl ViewConfig {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            page_size: DEFAULT_PAGE_SIZE,
            fields: Vec::new(),
            sync_url: false,
        }
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size.max(1);
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn sync_url(mut self, sync: bool) -> Self {
        self.sync_url = sync;
        self
    }
}

/// Controller lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Draft equals applied, nothing in flight.
    Idle,
    /// Draft differs from applied, nothing dispatched yet.
    Editing,
    /// A list call is in flight for the current applied snapshot.
    Querying,
    /// The latest call resolved; rendered state reflects its snapshot.
    Queried,
}

/// A list call the caller must perform: the sequence number to complete
/// with, and the spec to send.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDispatch {
    pub seq: u64,
    pub spec: QuerySpec,
}

/// What a completed call did to the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The result was accepted and is now the rendered state.
    Updated,
    /// The call failed; the previous result stays on screen and the message
    /// should surface as a transient notification.
    Failed(String),
    /// The session ended while this call was in flight; the view should
    /// navigate to the login route (it was also notified via the session
    /// event channel).
    SessionEnded,
    /// An older dispatch resolved after a newer one was issued; nothing
    /// changed.
    Stale,
}

/// The per-view filter state machine. Pure state, no I/O.
#[derive(Debug)]
pub struct FilterController {
    config: ViewConfig,
    draft: HashMap<String, FilterValue>,
    applied: HashMap<String, FilterValue>,
    page: u32,
    sort: Option<Sort>,
    phase: Phase,
    /// Sequence number of the most recently issued dispatch.
    seq: u64,
    result: Option<ListResult>,
    last_error: Option<String>,
}

impl FilterController {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            draft: HashMap::new(),
            applied: HashMap::new(),
            page: 1,
            sort: None,
            phase: Phase::Idle,
            seq: 0,
            result: None,
            last_error: None,
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    /// The last successfully rendered result, if any.
    pub fn result(&self) -> Option<&ListResult> {
        self.result.as_ref()
    }

    /// The message of the last failed call, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The draft value of a field.
    pub fn draft_value(&self, field: &str) -> Option<&FilterValue> {
        self.draft.get(field)
    }

    /// The applied value of a field.
    pub fn applied_value(&self, field: &str) -> Option<&FilterValue> {
        self.applied.get(field)
    }

    fn field_spec(&self, name: &str) -> Option<&FieldSpec> {
        self.config.fields.iter().find(|f| f.name == name)
    }

    /// Builds the spec for the current applied snapshot. Fields are emitted
    /// in config order; blank values never materialize.
    pub fn query_spec(&self) -> QuerySpec {
        let mut spec = QuerySpec::new(self.config.resource.clone())
            .page(self.page)
            .page_size(self.config.page_size);
        for field in &self.config.fields {
            if let Some(value) = self.applied.get(&field.name) {
                spec = spec.filter(field.name.clone(), value.clone());
            }
        }
        if let Some(sort) = &self.sort {
            spec = spec.sort(sort.clone());
        }
        spec
    }

    fn dispatch(&mut self) -> QueryDispatch {
        self.seq += 1;
        self.phase = Phase::Querying;
        let dispatch = QueryDispatch {
            seq: self.seq,
            spec: self.query_spec(),
        };
        debug!(
            resource = %dispatch.spec.resource,
            seq = dispatch.seq,
            page = dispatch.spec.page,
            "dispatching list query"
        );
        dispatch
    }

    /// Records a user edit to a field. Instant fields apply immediately and
    /// return a dispatch; deferred fields only move the draft.
    pub fn edit(
        &mut self,
        field: &str,
        value: impl Into<FilterValue>,
    ) -> Option<QueryDispatch> {
        let Some(spec) = self.field_spec(field) else {
            warn!(field, "edit to unconfigured field ignored");
            return None;
        };
        let mode = spec.apply;

        let value = value.into();
        if value.is_blank() {
            self.draft.remove(field);
        } else {
            self.draft.insert(field.to_string(), value);
        }

        match mode {
            ApplyMode::Instant => Some(self.apply()),
            ApplyMode::Deferred => {
                // Inputs stay editable while a call is in flight; only a
                // settled controller moves to Editing.
                if matches!(self.phase, Phase::Idle | Phase::Queried) {
                    self.phase = Phase::Editing;
                }
                None
            }
        }
    }

    /// Applies the draft: it becomes the new applied snapshot, the page
    /// resets to 1 and one list call is issued.
    pub fn apply(&mut self) -> QueryDispatch {
        self.applied = self.draft.clone();
        self.page = 1;
        self.dispatch()
    }

    /// Re-issues the current applied snapshot (initial mount, refresh
    /// button, post-mutation refetch).
    pub fn reload(&mut self) -> QueryDispatch {
        self.dispatch()
    }

    /// Moves to another page of the applied snapshot.
    pub fn set_page(&mut self, page: u32) -> QueryDispatch {
        self.page = page.max(1);
        self.dispatch()
    }

    /// Changes the active sort. Applies instantly, keeping filters and page.
    pub fn set_sort(&mut self, sort: Option<Sort>) -> QueryDispatch {
        self.sort = sort;
        self.dispatch()
    }

    /// Resets draft and applied to all-fields-unset and issues the empty
    /// spec. Idempotent: clearing twice produces the same spec.
    pub fn clear(&mut self) -> QueryDispatch {
        self.draft.clear();
        self.applied.clear();
        self.sort = None;
        self.page = 1;
        self.dispatch()
    }

    /// Feeds a resolved list call back into the controller.
    ///
    /// The ordering guarantee lives here: a completion whose sequence number
    /// is not the latest issued returns [`Completion::Stale`] and changes
    /// nothing, so a slow response for an older snapshot can never overwrite
    /// newer state.
    pub fn complete(
        &mut self,
        seq: u64,
        outcome: Result<ListResult, ClientError>,
    ) -> Completion {
        if seq != self.seq {
            debug!(seq, latest = self.seq, "discarding stale list response");
            return Completion::Stale;
        }

        self.phase = Phase::Queried;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.last_error = None;
                Completion::Updated
            }
            Err(e) if e.is_auth_expired() => Completion::SessionEnded,
            Err(e) => {
                // Applied stays the attempted snapshot: the user sees what
                // they searched for, even if it failed, and may retry.
                let message = e.user_message();
                self.last_error = Some(message.clone());
                Completion::Failed(message)
            }
        }
    }

    // ── URL mirroring ────────────────────────────────────────────

    /// Encodes the applied snapshot as a navigable URL query string, or
    /// `None` when this view doesn't sync the URL.
    pub fn url_query(&self) -> Option<String> {
        if !self.config.sync_url {
            return None;
        }
        let mut parts = Vec::new();
        for field in &self.config.fields {
            if let Some(value) = self.applied.get(&field.name) {
                if !value.is_blank() {
                    parts.push(format!(
                        "{}={}",
                        urlencoding::encode(&field.name),
                        urlencoding::encode(&value.encode())
                    ));
                }
            }
        }
        if self.page > 1 {
            parts.push(format!("page={}", self.page));
        }
        if let Some(sort) = &self.sort {
            let order = match sort.order {
                SortOrder::Asc => "asc",
                SortOrder::Desc => "desc",
            };
            parts.push(format!("sort={}:{order}", urlencoding::encode(&sort.field)));
        }
        Some(parts.join("&"))
    }

    /// Hydrates draft and applied from a URL query string and issues the
    /// first call, so a shared link reproduces the same filtered, sorted,
    /// paginated view. Unknown keys are ignored.
    pub fn hydrate(&mut self, query: &str) -> QueryDispatch {
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, raw) = match pair.split_once('=') {
                Some((k, v)) => (k, v),
                None => (pair, ""),
            };
            let key = urlencoding::decode(key).map(|k| k.into_owned()).unwrap_or_default();
            let value = urlencoding::decode(raw).map(|v| v.into_owned()).unwrap_or_default();

            match key.as_str() {
                "page" => {
                    if let Ok(page) = value.parse::<u32>() {
                        self.page = page.max(1);
                    }
                }
                "sort" => {
                    let (field, order) = match value.rsplit_once(':') {
                        Some((f, "desc")) => (f, SortOrder::Desc),
                        Some((f, _)) => (f, SortOrder::Asc),
                        None => (value.as_str(), SortOrder::Asc),
                    };
                    if !field.is_empty() {
                        self.sort = Some(Sort {
                            field: field.to_string(),
                            order,
                        });
                    }
                }
                name if self.field_spec(name).is_some() => {
                    if !value.is_empty() {
                        self.draft
                            .insert(name.to_string(), FilterValue::Str(value));
                    }
                }
                other => {
                    debug!(key = other, "ignoring unknown URL parameter");
                }
            }
        }
        self.applied = self.draft.clone();
        self.dispatch()
    }
}
