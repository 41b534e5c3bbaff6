//! In-memory stand-ins for the backend, the table body and the browser
//! event loop, used by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::api::{decode_client_list, DashboardApi};
use crate::error::DashboardError;
use crate::models::{ClientRecord, EditRequest, GroupIdentifiers, RenderedRow};
use crate::scheduler::{LocalTask, Scheduler, TimerHandle};
use crate::table::TableBody;

/// Scripted backend. `Err(status)` answers with that HTTP status; the
/// clients body goes through the same text-then-JSON decode as the real one.
pub struct FakeApi {
    clients: RefCell<Result<String, u16>>,
    group_ids: RefCell<Result<GroupIdentifiers, u16>>,
    edit_status: Cell<u16>,
    edits: RefCell<Vec<EditRequest>>,
    client_fetches: Cell<usize>,
    group_id_fetches: Cell<usize>,
    yield_on_group_ids: Cell<bool>,
    yield_on_edit: Cell<bool>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            clients: RefCell::new(Ok("[]".to_string())),
            group_ids: RefCell::new(Ok(GroupIdentifiers::FALLBACK)),
            edit_status: Cell::new(200),
            edits: RefCell::new(Vec::new()),
            client_fetches: Cell::new(0),
            group_id_fetches: Cell::new(0),
            yield_on_group_ids: Cell::new(false),
            yield_on_edit: Cell::new(false),
        }
    }

    /// Make the group-ids request suspend once before answering
    pub fn yield_on_group_ids(&self) {
        self.yield_on_group_ids.set(true);
    }

    /// Make every edit request suspend once before answering
    pub fn yield_on_edit(&self) {
        self.yield_on_edit.set(true);
    }

    pub fn set_clients(&self, response: Result<String, u16>) {
        *self.clients.borrow_mut() = response;
    }

    pub fn set_group_ids(&self, response: Result<GroupIdentifiers, u16>) {
        *self.group_ids.borrow_mut() = response;
    }

    pub fn set_edit_status(&self, status: u16) {
        self.edit_status.set(status);
    }

    pub fn edits(&self) -> Vec<EditRequest> {
        self.edits.borrow().clone()
    }

    pub fn client_fetches(&self) -> usize {
        self.client_fetches.get()
    }

    pub fn group_id_fetches(&self) -> usize {
        self.group_id_fetches.get()
    }
}

fn status_error(url: &str, status: u16) -> DashboardError {
    DashboardError::Status {
        url: url.to_string(),
        status,
    }
}

impl DashboardApi for FakeApi {
    async fn fetch_clients(&self) -> Result<Vec<ClientRecord>, DashboardError> {
        self.client_fetches.set(self.client_fetches.get() + 1);
        let contents = self
            .clients
            .borrow()
            .clone()
            .map_err(|status| status_error("/clients", status))?;
        decode_client_list("/clients", &contents)
    }

    async fn fetch_group_ids(&self) -> Result<GroupIdentifiers, DashboardError> {
        self.group_id_fetches.set(self.group_id_fetches.get() + 1);
        if self.yield_on_group_ids.get() {
            tokio::task::yield_now().await;
        }
        (*self.group_ids.borrow()).map_err(|status| status_error("/group-ids", status))
    }

    async fn edit_client(&self, request: &EditRequest) -> Result<(), DashboardError> {
        self.edits.borrow_mut().push(request.clone());
        if self.yield_on_edit.get() {
            tokio::task::yield_now().await;
        }
        match self.edit_status.get() {
            200..=299 => Ok(()),
            status => Err(status_error("/editclient", status)),
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryTable(Rc<RefCell<Vec<RenderedRow>>>);

impl MemoryTable {
    pub fn rows(&self) -> Vec<RenderedRow> {
        self.0.borrow().clone()
    }
}

impl TableBody for MemoryTable {
    fn replace_rows(&self, rows: Vec<RenderedRow>) {
        *self.0.borrow_mut() = rows;
    }

    fn row(&self, index: usize) -> Option<RenderedRow> {
        self.0.borrow().get(index).cloned()
    }

    fn row_count(&self) -> usize {
        self.0.borrow().len()
    }
}

type TickSlot = Rc<RefCell<Option<Box<dyn FnMut()>>>>;

#[derive(Default)]
struct ManualState {
    tasks: RefCell<VecDeque<LocalTask>>,
    timers: RefCell<Vec<TickSlot>>,
    periods: RefCell<Vec<u32>>,
}

/// Timers fire only on `tick()`; spawned tasks run only on `run_pending()`
#[derive(Clone, Default)]
pub struct ManualScheduler(Rc<ManualState>);

impl ManualScheduler {
    /// Fire every live timer once
    pub fn tick(&self) {
        let slots: Vec<TickSlot> = self.0.timers.borrow().clone();
        for slot in slots {
            if let Some(tick) = slot.borrow_mut().as_mut() {
                tick();
            }
        }
    }

    /// Run spawned tasks, including ones they spawn, until none remain
    pub async fn run_pending(&self) {
        loop {
            let next = self.0.tasks.borrow_mut().pop_front();
            match next {
                Some(task) => task.await,
                None => break,
            }
        }
    }

    pub fn pending(&self) -> usize {
        self.0.tasks.borrow().len()
    }

    pub fn active_timers(&self) -> usize {
        self.0
            .timers
            .borrow()
            .iter()
            .filter(|slot| slot.borrow().is_some())
            .count()
    }

    pub fn timers_created(&self) -> usize {
        self.0.timers.borrow().len()
    }

    pub fn periods(&self) -> Vec<u32> {
        self.0.periods.borrow().clone()
    }
}

struct ManualTimer(TickSlot);

impl TimerHandle for ManualTimer {
    fn cancel(self: Box<Self>) {}
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.0.borrow_mut().take();
    }
}

impl Scheduler for ManualScheduler {
    fn spawn(&self, task: LocalTask) {
        self.0.tasks.borrow_mut().push_back(task);
    }

    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Box<dyn TimerHandle> {
        let slot: TickSlot = Rc::new(RefCell::new(Some(tick)));
        self.0.timers.borrow_mut().push(Rc::clone(&slot));
        self.0.periods.borrow_mut().push(period_ms);
        Box::new(ManualTimer(slot))
    }
}
