//! The structured span/metric entry points other crates instrument with.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use crate::config::TelemetryConfig;
use crate::cycles::read_cycles;
use crate::sink::TelemetrySink;
use crate::span::{AttrValue, SpanHandle, SpanRecord, SpanStatus};

/// Slab of in-flight spans, indexed by `SpanHandle`.
///
/// Completed slots are pushed onto `free` and reused by the next
/// `span_begin`, so the slab does not grow unbounded across a long-lived
/// process.
struct Slab {
    slots: Vec<Option<SpanRecord>>,
    free: Vec<u32>,
}

impl Slab {
    const fn new() -> Self {
        Self { slots: Vec::new(), free: Vec::new() }
    }

    fn insert(&mut self, record: SpanRecord) -> u32 {
        if let Some(index) = self.free.pop() {
            self.slots[index as usize] = Some(record);
            index
        } else {
            self.slots.push(Some(record));
            (self.slots.len() - 1) as u32
        }
    }

    fn take(&mut self, index: u32) -> Option<SpanRecord> {
        let slot = self.slots.get_mut(index as usize)?;
        let record = slot.take();
        if record.is_some() {
            self.free.push(index);
        }
        record
    }

    fn get_mut(&mut self, index: u32) -> Option<&mut SpanRecord> {
        self.slots.get_mut(index as usize)?.as_mut()
    }
}

/// The cycle-budgeted span and metric recorder.
///
/// `span_begin`/`span_end` bracket an operation; `metric_record_memory` and
/// `metric_record_violation` report point-in-time measurements. Every
/// method is a no-op on a [`SpanHandle::SAMPLED_OUT`] handle, so call sites
/// do not need to branch on sampling themselves.
pub struct TelemetryHook<S: TelemetrySink> {
    config: TelemetryConfig,
    sink: S,
    slab: Mutex<Slab>,
    sample_counter: AtomicU32,
}

impl<S: TelemetrySink> TelemetryHook<S> {
    /// Builds a hook around `sink`, sampling and budget-checking per `config`.
    pub const fn new(config: TelemetryConfig, sink: S) -> Self {
        Self { config, sink, slab: Mutex::new(Slab::new()), sample_counter: AtomicU32::new(0) }
    }

    fn sampled_in(&self) -> bool {
        let rate = self.config.sample_rate.max(1);
        let n = self.sample_counter.fetch_add(1, Ordering::Relaxed);
        n % rate == 0
    }

    /// Begins a span named `name`, optionally nested under `parent`.
    ///
    /// Returns [`SpanHandle::SAMPLED_OUT`] when the sample counter decides to
    /// skip this span; every other method treats that handle as a no-op.
    #[must_use]
    pub fn span_begin(&self, name: &str, parent: Option<SpanHandle>) -> SpanHandle {
        if !self.sampled_in() {
            return SpanHandle::SAMPLED_OUT;
        }
        let record = SpanRecord {
            name: name.to_owned(),
            parent,
            attrs: Vec::new(),
            start_cycles: read_cycles(),
        };
        let mut slab = self.slab.lock().expect("span slab poisoned");
        SpanHandle(slab.insert(record))
    }

    /// Attaches `key = value` to the still-open span `handle`.
    pub fn span_set_attr(&self, handle: SpanHandle, key: &str, value: impl Into<AttrValue>) {
        if !handle.is_recording() {
            return;
        }
        let mut slab = self.slab.lock().expect("span slab poisoned");
        if let Some(record) = slab.get_mut(handle.0) {
            record.attrs.push((key.to_owned(), value.into()));
        }
    }

    /// Ends the span `handle` with `status`, releasing it to the sink and
    /// recording a budget violation if it ran past `tick_threshold`.
    pub fn span_end(&self, handle: SpanHandle, status: SpanStatus) {
        if !handle.is_recording() {
            return;
        }
        let record = {
            let mut slab = self.slab.lock().expect("span slab poisoned");
            slab.take(handle.0)
        };
        let Some(record) = record else { return };
        let elapsed = read_cycles().saturating_sub(record.start_cycles);
        self.sink.on_span_end(&record.name, &record.attrs, status, elapsed);
        if elapsed > self.config.tick_threshold {
            self.sink.on_metric_violation(&record.name, elapsed, self.config.tick_threshold);
        }
    }

    /// Reports current arena memory usage.
    pub fn metric_record_memory(&self, used: usize, total: usize) {
        self.sink.on_metric_memory(used, total);
    }

    /// Reports that `op` took `actual_cycles`, against a `threshold` budget.
    pub fn metric_record_violation(&self, op: &str, actual_cycles: u64, threshold: u64) {
        self.sink.on_metric_violation(op, actual_cycles, threshold);
    }
}
