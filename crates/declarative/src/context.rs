//! Observer callbacks for reconciliation runs
//!
//! The engine reports what it does through [`ApplyObserver`] so callers
//! decide how (or whether) to print it. Nothing in this crate writes to
//! the terminal.

/// Receives notifications during a verify or apply pass
pub trait ApplyObserver {
    /// Called before a row is read, in table order
    fn on_evaluate(&mut self, _label: &str) {}

    /// Called after a divergent row converged; `display` is the new display value
    fn on_updated(&mut self, label: &str, display: &str);

    /// Called by a preview run where a real run would have updated the row
    fn on_would_update(&mut self, _label: &str, _display: &str) {}
}

/// No-op observer
pub struct Silent;

impl ApplyObserver for Silent {
    fn on_updated(&mut self, _label: &str, _display: &str) {}
}

/// Observer that records every notification, in order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Recorder {
    pub evaluated: Vec<String>,
    pub updated: Vec<(String, String)>,
    pub would_update: Vec<(String, String)>,
}

impl ApplyObserver for Recorder {
    fn on_evaluate(&mut self, label: &str) {
        self.evaluated.push(label.to_string());
    }

    fn on_updated(&mut self, label: &str, display: &str) {
        self.updated.push((label.to_string(), display.to_string()));
    }

    fn on_would_update(&mut self, label: &str, display: &str) {
        self.would_update
            .push((label.to_string(), display.to_string()));
    }
}
