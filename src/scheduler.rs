//! Task Scheduling
//!
//! Local task spawning plus a cancellable repeating timer. In the browser
//! this is `wasm_bindgen_futures::spawn_local` and a `gloo_timers` interval.

use std::future::Future;
use std::pin::Pin;

use gloo_timers::callback::Interval;

pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Handle to a repeating timer; cancelling stops further ticks
pub trait TimerHandle {
    fn cancel(self: Box<Self>);
}

pub trait Scheduler {
    fn spawn(&self, task: LocalTask);

    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Box<dyn TimerHandle>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl TimerHandle for Interval {
    fn cancel(self: Box<Self>) {
        let _ = (*self).cancel();
    }
}

impl Scheduler for BrowserScheduler {
    fn spawn(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Box<dyn TimerHandle> {
        Box::new(Interval::new(period_ms, tick))
    }
}
