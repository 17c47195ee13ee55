//! Reconciliation engine
//!
//! Two passes over a descriptor table, both strictly in table order:
//!
//! - [`verify`]: read-only; produces one report row per setting.
//! - [`apply`]: for each divergent row, write, re-read, and stop the whole
//!   run at the first row that does not converge. Rows already updated in
//!   the same pass stay updated.
//! - [`preview`]: a full [`apply`] against a scratch copy of the host, so
//!   rows whose actual value depends on earlier writes are counted the way
//!   a real run would count them.

use crate::context::ApplyObserver;
use crate::error::{Error, Result};
use crate::setting::Setting;
use crate::store::VariableStore;
use serde::{Deserialize, Serialize};

/// One row of a verification report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub setting: String,
    pub actual: String,
    pub expected: String,
}

/// Outcome of a verify pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub rows: Vec<ReportRow>,
    pub divergent: usize,
}

impl Verification {
    /// True when every setting holds its expected value
    pub fn is_clean(&self) -> bool {
        self.divergent == 0
    }
}

/// Outcome of an apply pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplySummary {
    /// Settings found divergent when first read
    pub divergent: usize,
    /// Settings written and confirmed
    pub updated: usize,
}

/// Read every setting and compare it against its expected value
pub fn verify<H, O>(settings: &[Setting<H>], host: &H, observer: &mut O) -> Verification
where
    H: VariableStore,
    O: ApplyObserver,
{
    let mut report = Verification::default();

    for setting in settings {
        observer.on_evaluate(setting.label);
        let actual = setting.read(host);
        let matches = setting.matches(&actual);
        log::debug!(
            "verify '{}': actual={:?} expected={:?} matches={}",
            setting.label,
            actual,
            setting.expected,
            matches
        );

        if !matches {
            report.divergent += 1;
        }

        report.rows.push(ReportRow {
            setting: setting.label.to_string(),
            actual: actual.display_against(&setting.expected),
            expected: setting.expected.display_against(&setting.expected),
        });
    }

    report
}

/// Converge every divergent setting, failing fast on the first that won't
pub fn apply<H, O>(
    settings: &[Setting<H>],
    host: &mut H,
    observer: &mut O,
) -> Result<ApplySummary>
where
    H: VariableStore,
    O: ApplyObserver,
{
    let mut summary = ApplySummary::default();

    for setting in settings {
        observer.on_evaluate(setting.label);
        let actual = setting.read(host);
        if setting.matches(&actual) {
            log::debug!("apply '{}': already {:?}", setting.label, actual);
            continue;
        }
        summary.divergent += 1;

        let target = setting.expected.display_against(&setting.expected);
        log::info!(
            "updating '{}' from {:?} to {:?}",
            setting.label,
            actual,
            setting.expected
        );
        setting.write(host)?;

        let after = setting.read(host);
        if !setting.matches(&after) {
            return Err(Error::NotConverged {
                label: setting.label.to_string(),
                actual: after.display_against(&setting.expected),
                expected: target,
            });
        }

        observer.on_updated(setting.label, &after.display_against(&setting.expected));
        summary.updated += 1;
    }

    Ok(summary)
}

/// Reports `on_updated` from a scratch run as `on_would_update`
struct Preview<'a, O>(&'a mut O);

impl<O: ApplyObserver> ApplyObserver for Preview<'_, O> {
    fn on_evaluate(&mut self, label: &str) {
        self.0.on_evaluate(label);
    }

    fn on_updated(&mut self, label: &str, display: &str) {
        self.0.on_would_update(label, display);
    }
}

/// Run [`apply`] against `scratch` and report each write as a would-update
///
/// `scratch` must be a copy of the host whose writes go nowhere; the real
/// host is never touched. The summary is what [`apply`] would return.
pub fn preview<H, O>(
    settings: &[Setting<H>],
    mut scratch: H,
    observer: &mut O,
) -> Result<ApplySummary>
where
    H: VariableStore,
    O: ApplyObserver,
{
    apply(settings, &mut scratch, &mut Preview(observer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Recorder, Silent};
    use crate::store::MemoryStore;
    use crate::value::Value;

    /// Last row reports whether the first three variables are all on
    fn rules_status(store: &MemoryStore) -> Value {
        let all_on = ["a", "b", "c"]
            .iter()
            .all(|name| store.get_variable(name).is_truthy());
        if store.get_variable("rules_for_all").is_truthy() && all_on {
            Value::from("configured")
        } else {
            Value::from("missing-rules")
        }
    }

    fn regenerate_rules(store: &mut MemoryStore) -> anyhow::Result<()> {
        let all_on = ["a", "b", "c"]
            .iter()
            .all(|name| store.get_variable(name).is_truthy());
        store.set_variable("rules_for_all", Value::Bool(all_on))
    }

    fn table() -> Vec<Setting<MemoryStore>> {
        vec![
            Setting::variable("A", "a", 1),
            Setting::variable("B", "b", true),
            Setting::variable("C", "c", 1),
            Setting::variable("D", "d", 0),
            Setting::custom("Rules", "configured", rules_status, Some(regenerate_rules)),
        ]
    }

    fn converged() -> MemoryStore {
        MemoryStore::new()
            .with("a", 1)
            .with("b", "1")
            .with("c", true)
            .with("rules_for_all", 1)
    }

    /// Store whose "c" silently refuses writes
    #[derive(Default)]
    struct Stubborn(MemoryStore);

    impl VariableStore for Stubborn {
        fn get_variable(&self, name: &str) -> Value {
            self.0.get_variable(name)
        }

        fn set_variable(&mut self, name: &str, value: Value) -> anyhow::Result<()> {
            if name == "c" {
                return Ok(());
            }
            self.0.set_variable(name, value)
        }
    }

    #[test]
    fn test_verify_clean() {
        let report = verify(&table(), &converged(), &mut Silent);
        assert!(report.is_clean());
        assert_eq!(report.rows.len(), 5);
        assert_eq!(report.rows[3].actual, "disabled");
        assert_eq!(report.rows[4].actual, "configured");
    }

    #[test]
    fn test_verify_reports_divergence() {
        let mut store = converged();
        store.set_variable("b", Value::Int(0)).unwrap();

        let report = verify(&table(), &store, &mut Silent);
        assert_eq!(report.divergent, 2);
        assert_eq!(
            report.rows[1],
            ReportRow {
                setting: "B".into(),
                actual: "disabled".into(),
                expected: "enabled".into(),
            }
        );
        assert_eq!(report.rows[4].actual, "missing-rules");
    }

    #[test]
    fn test_verify_is_read_only() {
        let store = MemoryStore::new().with("a", 0);
        let first = verify(&table(), &store, &mut Silent);
        let second = verify(&table(), &store, &mut Silent);
        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_apply_updates_in_table_order() {
        let mut store = MemoryStore::new().with("b", 1);
        let mut recorder = Recorder::default();

        let summary = apply(&table(), &mut store, &mut recorder).unwrap();

        assert_eq!(summary.updated, 3);
        assert_eq!(summary.divergent, 3);
        let labels: Vec<_> = recorder.updated.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["A", "C", "Rules"]);
        assert_eq!(recorder.updated[0].1, "enabled");
        assert_eq!(recorder.updated[2].1, "configured");
        assert_eq!(recorder.evaluated, ["A", "B", "C", "D", "Rules"]);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut store = MemoryStore::new();
        let first = apply(&table(), &mut store, &mut Silent).unwrap();
        let second = apply(&table(), &mut store, &mut Silent).unwrap();

        assert_eq!(first.updated, 4);
        assert_eq!(second, ApplySummary::default());
        assert!(verify(&table(), &store, &mut Silent).is_clean());
    }

    #[test]
    fn test_apply_fails_fast_on_non_convergence() {
        let mut store = Stubborn::default();
        let mut recorder = Recorder::default();
        let settings: Vec<Setting<Stubborn>> = vec![
            Setting::variable("A", "a", 1),
            Setting::variable("B", "b", 1),
            Setting::variable("C", "c", 1),
            Setting::variable("D", "d", 1),
            Setting::variable("E", "e", 1),
        ];

        let err = apply(&settings, &mut store, &mut recorder).unwrap_err();

        assert!(matches!(err, Error::NotConverged { ref label, .. } if label == "C"));
        assert_eq!(recorder.evaluated, ["A", "B", "C"]);
        // Earlier writes are not rolled back
        assert_eq!(store.get_variable("a"), Value::Int(1));
        assert_eq!(store.get_variable("d"), Value::Null);
    }

    #[test]
    fn test_apply_halts_on_missing_writer() {
        fn always_off(_: &MemoryStore) -> Value {
            Value::Bool(false)
        }

        let settings: Vec<Setting<MemoryStore>> = vec![
            Setting::custom("Read only", true, always_off, None),
            Setting::variable("After", "after", 1),
        ];
        let mut store = MemoryStore::new();

        let err = apply(&settings, &mut store, &mut Silent).unwrap_err();
        assert!(err.is_table_defect());
        assert_eq!(store.get_variable("after"), Value::Null);
    }

    #[test]
    fn test_preview_leaves_host_untouched() {
        let store = MemoryStore::new().with("b", 1);
        let mut recorder = Recorder::default();

        let summary = preview(&table(), store.clone(), &mut recorder).unwrap();

        assert_eq!(summary, ApplySummary { divergent: 3, updated: 3 });
        assert!(recorder.updated.is_empty());
        let labels: Vec<_> = recorder.would_update.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["A", "C", "Rules"]);
        assert_eq!(store.len(), 1);
    }

    /// Rules are current when they were built for the present value of "c"
    fn rules_track_c(store: &MemoryStore) -> Value {
        if store.get_variable("rules_c").loose_eq(&store.get_variable("c")) {
            Value::from("configured")
        } else {
            Value::from("outdated-rules")
        }
    }

    fn rebuild_for_c(store: &mut MemoryStore) -> anyhow::Result<()> {
        let c = store.get_variable("c");
        store.set_variable("rules_c", c)
    }

    #[test]
    fn test_preview_counts_rows_invalidated_by_earlier_writes() {
        let settings: Vec<Setting<MemoryStore>> = vec![
            Setting::variable("C", "c", 1),
            Setting::custom("Rules", "configured", rules_track_c, Some(rebuild_for_c)),
        ];
        // Rules match the current value of "c", so only "C" diverges up front
        let mut store = MemoryStore::new().with("c", 0).with("rules_c", 0);
        assert_eq!(verify(&settings, &store, &mut Silent).divergent, 1);

        let mut recorder = Recorder::default();
        let dry = preview(&settings, store.clone(), &mut recorder).unwrap();
        let real = apply(&settings, &mut store, &mut Silent).unwrap();

        assert_eq!(dry, real);
        assert_eq!(real.updated, 2);
        assert_eq!(recorder.would_update.len(), 2);
    }
}
