use std::sync::Arc;

use parking_lot::Mutex;

use crate::events::{EventSink, SplitEvent};

/// Test sink that records every event. Clones share the same log, so one
/// clone can be moved into a worker while another inspects the result.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<SplitEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SplitEvent> {
        self.events.lock().clone()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                SplitEvent::Status(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn progress(&self) -> Vec<f64> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                SplitEvent::Progress(fraction) => Some(*fraction),
                _ => None,
            })
            .collect()
    }

    pub fn done(&self) -> Vec<bool> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                SplitEvent::Done(success) => Some(*success),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn on_status(&mut self, text: &str) {
        self.events.lock().push(SplitEvent::Status(text.to_string()));
    }

    fn on_progress(&mut self, fraction: f64) {
        self.events.lock().push(SplitEvent::Progress(fraction));
    }

    fn on_done(&mut self, success: bool) {
        self.events.lock().push(SplitEvent::Done(success));
    }
}
