//! Async glue between a [`FilterController`] and the query engine.
//!
//! Each dispatch becomes a spawned fetch task; any number may be in flight
//! at once, and the controller's sequence check decides which completion is
//! allowed to update rendered state. Inputs never lock up while a call is
//! running.

use crate::controller::{Completion, FilterController, QueryDispatch, ViewConfig};
use std::sync::Arc;
use switchboard_client::ResourceQueryEngine;
use switchboard_types::{FilterValue, ListResult, Sort};
use tokio::sync::{mpsc, Mutex};

/// What a view renders in response to.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// A fresh result for the latest applied snapshot.
    Updated(ListResult),
    /// The latest call failed; show a transient notification, keep the
    /// previous rows on screen.
    Failed(String),
    /// The session ended; navigate to the login route.
    SessionEnded,
}

/// One list page wired to the engine.
pub struct ListView {
    controller: Arc<Mutex<FilterController>>,
    engine: Arc<ResourceQueryEngine>,
    events: mpsc::Sender<ViewEvent>,
}

impl ListView {
    /// Creates the view and the event stream it renders from.
    pub fn new(
        engine: Arc<ResourceQueryEngine>,
        config: ViewConfig,
    ) -> (Self, mpsc::Receiver<ViewEvent>) {
        let (events, rx) = mpsc::channel(32);
        let view = Self {
            controller: Arc::new(Mutex::new(FilterController::new(config))),
            engine,
            events,
        };
        (view, rx)
    }

    /// Issues the first call. With a URL query present (and URL sync
    /// configured), the controller hydrates from it first.
    pub async fn mount(&self, url_query: Option<&str>) {
        let dispatch = {
            let mut ctl = self.controller.lock().await;
            match url_query {
                Some(query) if ctl.config().sync_url => ctl.hydrate(query),
                _ => ctl.reload(),
            }
        };
        self.spawn_fetch(dispatch);
    }

    /// Records a field edit; instant fields fetch immediately.
    pub async fn edit(&self, field: &str, value: impl Into<FilterValue>) {
        let dispatch = self.controller.lock().await.edit(field, value);
        if let Some(dispatch) = dispatch {
            self.spawn_fetch(dispatch);
        }
    }

    /// Applies the draft filters.
    pub async fn apply(&self) {
        let dispatch = self.controller.lock().await.apply();
        self.spawn_fetch(dispatch);
    }

    /// Clears all filters and refetches.
    pub async fn clear(&self) {
        let dispatch = self.controller.lock().await.clear();
        self.spawn_fetch(dispatch);
    }

    /// Moves to another page.
    pub async fn set_page(&self, page: u32) {
        let dispatch = self.controller.lock().await.set_page(page);
        self.spawn_fetch(dispatch);
    }

    /// Changes the active sort.
    pub async fn set_sort(&self, sort: Option<Sort>) {
        let dispatch = self.controller.lock().await.set_sort(sort);
        self.spawn_fetch(dispatch);
    }

    /// Refetches the current applied snapshot (refresh button, or after a
    /// confirmed mutation — data only ever updates by refetching).
    pub async fn refresh(&self) {
        let dispatch = self.controller.lock().await.reload();
        self.spawn_fetch(dispatch);
    }

    /// The URL query mirroring the applied snapshot, when configured.
    pub async fn url_query(&self) -> Option<String> {
        self.controller.lock().await.url_query()
    }

    /// The last rendered result.
    pub async fn result(&self) -> Option<ListResult> {
        self.controller.lock().await.result().cloned()
    }

    fn spawn_fetch(&self, dispatch: QueryDispatch) {
        let engine = Arc::clone(&self.engine);
        let controller = Arc::clone(&self.controller);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = engine.list(&dispatch.spec).await;
            let mut ctl = controller.lock().await;
            let event = match ctl.complete(dispatch.seq, outcome) {
                Completion::Updated => {
                    ViewEvent::Updated(ctl.result().cloned().unwrap_or_default())
                }
                Completion::Failed(message) => ViewEvent::Failed(message),
                Completion::SessionEnded => ViewEvent::SessionEnded,
                Completion::Stale => return,
            };
            drop(ctl);
            let _ = events.send(event).await;
        });
    }
}
