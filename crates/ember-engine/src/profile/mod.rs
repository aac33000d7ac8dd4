//! Injectable timing instrumentation.
//!
//! The engine keeps no ambient profiling state: callers attach a
//! [`ProfileSink`] around the calls they care about, typically via
//! [`time_scope`]. [`ProfileStats`] is the bundled aggregating sink.

use std::time::{Duration, Instant};

/// Observer for timed scopes.
pub trait ProfileSink {
    fn record(&mut self, label: &'static str, elapsed: Duration);
}

/// No-op sink for callers that sometimes disable instrumentation.
impl ProfileSink for () {
    fn record(&mut self, _label: &'static str, _elapsed: Duration) {}
}

/// Runs `f`, reporting its wall time to `sink` under `label`.
pub fn time_scope<T>(sink: &mut dyn ProfileSink, label: &'static str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = f();
    sink.record(label, start.elapsed());
    result
}

#[derive(Debug, Clone)]
pub struct ScopeStats {
    pub label: &'static str,
    pub calls: u32,
    pub total: Duration,
    pub min: Duration,
    pub max: Duration,
}

/// Aggregating sink: per-label call count and total/min/max wall time.
#[derive(Debug, Clone, Default)]
pub struct ProfileStats {
    entries: Vec<ScopeStats>,
}

impl ProfileStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[ScopeStats] {
        &self.entries
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// One line per label, heaviest total first.
    pub fn report(&self) -> String {
        let mut sorted: Vec<&ScopeStats> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.total.cmp(&a.total));

        let mut out = String::new();
        for s in sorted {
            let avg = s.total / s.calls.max(1);
            out.push_str(&format!(
                "{}: {} calls, total {:?}, avg {:?}, min {:?}, max {:?}\n",
                s.label, s.calls, s.total, avg, s.min, s.max
            ));
        }
        out
    }
}

impl ProfileSink for ProfileStats {
    fn record(&mut self, label: &'static str, elapsed: Duration) {
        match self.entries.iter_mut().find(|e| e.label == label) {
            Some(e) => {
                e.calls += 1;
                e.total += elapsed;
                e.min = e.min.min(elapsed);
                e.max = e.max.max(elapsed);
            }
            None => self.entries.push(ScopeStats {
                label,
                calls: 1,
                total: elapsed,
                min: elapsed,
                max: elapsed,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_scope_returns_the_closure_result() {
        let mut stats = ProfileStats::new();
        let v = time_scope(&mut stats, "answer", || 42);
        assert_eq!(v, 42);
        assert_eq!(stats.entries().len(), 1);
        assert_eq!(stats.entries()[0].calls, 1);
    }

    #[test]
    fn repeated_labels_aggregate() {
        let mut stats = ProfileStats::new();
        stats.record("render", Duration::from_micros(10));
        stats.record("render", Duration::from_micros(30));
        stats.record("collide", Duration::from_micros(5));

        let render = &stats.entries()[0];
        assert_eq!(render.calls, 2);
        assert_eq!(render.total, Duration::from_micros(40));
        assert_eq!(render.min, Duration::from_micros(10));
        assert_eq!(render.max, Duration::from_micros(30));
    }

    #[test]
    fn report_orders_by_total_descending() {
        let mut stats = ProfileStats::new();
        stats.record("cheap", Duration::from_micros(1));
        stats.record("expensive", Duration::from_millis(10));

        let report = stats.report();
        let cheap_at = report.find("cheap").unwrap();
        let expensive_at = report.find("expensive").unwrap();
        assert!(expensive_at < cheap_at);
    }

    #[test]
    fn unit_sink_discards() {
        let mut sink = ();
        assert_eq!(time_scope(&mut sink, "noop", || 7), 7);
    }
}
