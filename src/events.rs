use std::sync::mpsc::Sender;

/// Notifications emitted during one run, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitEvent {
    /// Human-readable activity or per-file error text.
    Status(String),
    /// `completed / total`, in `[0.0, 1.0]`.
    Progress(f64),
    /// Final outcome, emitted exactly once.
    Done(bool),
}

/// Receiver for run notifications.
///
/// Calls arrive on the worker thread. Frontends with thread-affine state must
/// marshal them onto their own context.
pub trait EventSink: Send {
    fn on_status(&mut self, text: &str);
    fn on_progress(&mut self, fraction: f64);
    fn on_done(&mut self, success: bool);
}

/// Channel-backed sink. A dropped receiver is not an error; the run finishes regardless.
impl EventSink for Sender<SplitEvent> {
    fn on_status(&mut self, text: &str) {
        let _ = self.send(SplitEvent::Status(text.to_string()));
    }

    fn on_progress(&mut self, fraction: f64) {
        let _ = self.send(SplitEvent::Progress(fraction));
    }

    fn on_done(&mut self, success: bool) {
        let _ = self.send(SplitEvent::Done(success));
    }
}

type StatusFn = Box<dyn FnMut(&str) + Send>;
type ProgressFn = Box<dyn FnMut(f64) + Send>;
type DoneFn = Box<dyn FnMut(bool) + Send>;

/// Three independent callbacks, any of which may be left unset.
#[derive(Default)]
pub struct Callbacks {
    status: Option<StatusFn>,
    progress: Option<ProgressFn>,
    done: Option<DoneFn>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.status = Some(Box::new(f));
        self
    }

    pub fn with_progress(mut self, f: impl FnMut(f64) + Send + 'static) -> Self {
        self.progress = Some(Box::new(f));
        self
    }

    pub fn with_done(mut self, f: impl FnMut(bool) + Send + 'static) -> Self {
        self.done = Some(Box::new(f));
        self
    }
}

impl EventSink for Callbacks {
    fn on_status(&mut self, text: &str) {
        if let Some(f) = self.status.as_mut() {
            f(text);
        }
    }

    fn on_progress(&mut self, fraction: f64) {
        if let Some(f) = self.progress.as_mut() {
            f(fraction);
        }
    }

    fn on_done(&mut self, success: bool) {
        if let Some(f) = self.done.as_mut() {
            f(success);
        }
    }
}
