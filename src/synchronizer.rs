//! Client Table Synchronizer
//!
//! Owns the refresh loop: resolve groups once, render the client list,
//! re-render on a fixed timer and after every successful mutation.
//!
//! All failures are absorbed here. A failed fetch renders an empty table,
//! a failed mutation leaves the table as it was. Nothing is optimistic:
//! the table only ever shows what the last fetch returned.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::api::DashboardApi;
use crate::config::TABLE_HOST_ID;
use crate::error::DashboardError;
use crate::groups::GroupResolver;
use crate::models::{ClientRecord, EditRequest};
use crate::scheduler::{Scheduler, TimerHandle};
use crate::table::{build_rows, RowClick, TableBody};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Uninitialized,
    Resolving,
    /// Groups resolved but there is no table body to render into
    Inert,
    Polling,
    /// Polling with at least one mutation in flight
    Mutating,
    Stopped,
}

struct Inner<A, B, S> {
    api: Rc<A>,
    resolver: GroupResolver<A>,
    body: Option<B>,
    scheduler: S,
    refresh_interval_ms: u32,
    state: Cell<SyncState>,
    timer: RefCell<Option<Box<dyn TimerHandle>>>,
    mutations_in_flight: Cell<usize>,
    render_passes: Cell<u64>,
}

/// Counts one mutation for as long as it lives, including a dropped request
struct InFlight<'a>(&'a Cell<usize>);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a Cell<usize>) -> Self {
        counter.set(counter.get() + 1);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

/// Cheap to clone; clones share one synchronizer
pub struct TableSynchronizer<A, B, S> {
    inner: Rc<Inner<A, B, S>>,
}

impl<A, B, S> Clone for TableSynchronizer<A, B, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A, B, S> TableSynchronizer<A, B, S>
where
    A: DashboardApi + 'static,
    B: TableBody + 'static,
    S: Scheduler + 'static,
{
    pub fn new(
        api: Rc<A>,
        resolver: GroupResolver<A>,
        body: Option<B>,
        scheduler: S,
        refresh_interval_ms: u32,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                api,
                resolver,
                body,
                scheduler,
                refresh_interval_ms,
                state: Cell::new(SyncState::Uninitialized),
                timer: RefCell::new(None),
                mutations_in_flight: Cell::new(0),
                render_passes: Cell::new(0),
            }),
        }
    }

    pub fn state(&self) -> SyncState {
        let state = self.inner.state.get();
        if state == SyncState::Polling && self.inner.mutations_in_flight.get() > 0 {
            SyncState::Mutating
        } else {
            state
        }
    }

    pub fn render_passes(&self) -> u64 {
        self.inner.render_passes.get()
    }

    pub fn resolver(&self) -> &GroupResolver<A> {
        &self.inner.resolver
    }

    /// Resolve groups, render once, then arm the refresh timer.
    ///
    /// Without a table body the groups are still resolved, but nothing is
    /// rendered and no timer is armed.
    pub async fn initialize(&self) {
        if self.inner.state.get() != SyncState::Uninitialized {
            log::warn!("Client table already initialized ({:?}), ignoring", self.inner.state.get());
            return;
        }

        self.inner.state.set(SyncState::Resolving);
        self.inner.resolver.resolve().await;

        // teardown() may have run while the groups were resolving
        if self.inner.state.get() != SyncState::Resolving {
            return;
        }

        if self.inner.body.is_none() {
            let missing = DashboardError::MissingTableBody {
                selector: format!("#{}", TABLE_HOST_ID),
            };
            log::error!("{}. Auto-refresh aborted.", missing);
            self.inner.state.set(SyncState::Inert);
            return;
        }

        self.render_pass().await;

        // or while the first pass was in flight
        if self.inner.state.get() != SyncState::Resolving {
            return;
        }
        self.inner.state.set(SyncState::Polling);
        self.arm_timer();
    }

    fn arm_timer(&self) {
        let weak: Weak<Inner<A, B, S>> = Rc::downgrade(&self.inner);
        let tick = Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                let sync = TableSynchronizer { inner };
                let task_sync = sync.clone();
                sync.inner.scheduler.spawn(Box::pin(async move {
                    task_sync.render_pass().await;
                }));
            }
        });

        let handle = self.inner.scheduler.every(self.inner.refresh_interval_ms, tick);
        if let Some(previous) = self.inner.timer.replace(Some(handle)) {
            previous.cancel();
        }
        log::info!(
            "Client table auto-refresh started every {}ms.",
            self.inner.refresh_interval_ms
        );
    }

    async fn fetch_clients(&self) -> Vec<ClientRecord> {
        self.inner.api.fetch_clients().await.unwrap_or_else(|e| {
            log::error!("Error fetching client data: {}", e);
            Vec::new()
        })
    }

    /// One fetch-and-rebuild cycle. Returns the number of rows rendered.
    pub async fn render_pass(&self) -> usize {
        let Some(body) = self.inner.body.as_ref() else {
            return 0;
        };

        let clients = self.fetch_clients().await;
        let rows = build_rows(&clients, &self.inner.resolver.identifiers());
        let count = rows.len();
        body.replace_rows(rows);

        self.inner.render_passes.set(self.inner.render_passes.get() + 1);
        log::debug!("Rendered {} client rows", count);
        count
    }

    /// Delegated click handler. `click` is the data carried by the status
    /// button under the click, or `None` for any other cell.
    pub fn handle_click(&self, click: Option<RowClick>) {
        let Some(click) = click else {
            return;
        };
        let Some(body) = self.inner.body.as_ref() else {
            return;
        };
        let Some(row) = body.row(click.index) else {
            log::debug!(
                "Click on row {} but only {} rows rendered, ignoring",
                click.index,
                body.row_count()
            );
            return;
        };
        if !row.matches(&click) {
            log::warn!(
                "Click on stale row {} ({} -> {}), table now shows {}, ignoring",
                click.index,
                click.client,
                click.target_group,
                row.client
            );
            return;
        }

        let sync = self.clone();
        let request = row.edit_request();
        self.inner.scheduler.spawn(Box::pin(async move {
            sync.mutate(request).await;
        }));
    }

    /// Send the edit; on success re-render from the server's state.
    /// Returns whether the backend accepted the edit.
    pub async fn mutate(&self, request: EditRequest) -> bool {
        let result = {
            let _in_flight = InFlight::enter(&self.inner.mutations_in_flight);
            self.inner.api.edit_client(&request).await
        };

        match result {
            Ok(()) => {
                self.render_pass().await;
                true
            }
            Err(e) => {
                log::error!("Error updating client status for {}: {}", request.client, e);
                false
            }
        }
    }

    /// Cancel the refresh timer. Safe to call more than once.
    pub fn teardown(&self) {
        let timer = self.inner.timer.borrow_mut().take();
        if let Some(timer) = timer {
            timer.cancel();
            log::info!("Client table auto-refresh stopped.");
        }
        self.inner.state.set(SyncState::Stopped);
    }
}
