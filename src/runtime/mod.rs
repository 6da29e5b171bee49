pub(crate) mod listeners;
pub(crate) mod scheduler;

use crate::{
    lock::scroll_lock::ScrollLock,
    page::surface::Page,
    runtime::{listeners::Listeners, scheduler::Scheduler},
};

/// Shared resources handed to each component: the page, the scroll lock, the
/// listener table and the scheduler.
#[derive(Debug)]
pub struct Runtime<P> {
    pub page: P,
    pub lock: ScrollLock,
    pub listeners: Listeners,
    pub sched: Scheduler,
}

impl<P: Page> Runtime<P> {
    pub fn new(page: P) -> Self {
        Self {
            page,
            lock: ScrollLock::new(),
            listeners: Listeners::new(),
            sched: Scheduler::new(),
        }
    }
}
