//! Bounded, multi-zone bump allocator.
//!
//! Unlike a growable arena that chains chunks on demand, an [`Arena`] owns a
//! single fixed-capacity byte region decided at construction time. It never
//! reallocates: once the region is exhausted, `alloc` fails with
//! [`ArenaAllocError::OutOfCapacity`] rather than growing. The region may be
//! subdivided into up to [`MAX_ZONES`] sub-zones via [`Arena::add_zone`], each
//! with its own bump cursor; an allocation never crosses a zone boundary.
//!
//! # Examples
//!
//! ```
//! use arenac_mem::arena::Arena;
//!
//! let mut arena = Arena::new(1024);
//! let a = arena.alloc(64).unwrap();
//! let b = arena.alloc(32).unwrap();
//! assert_eq!(arena.info().used, 96);
//! assert_ne!(a, b);
//! ```

use std::fmt;
use std::ptr::NonNull;
use std::sync::Mutex;

/// Maximum number of sub-zones an [`Arena`] may carve out of its region.
pub const MAX_ZONES: usize = 16;

/// Default allocation alignment in bytes.
pub const DEFAULT_ALIGNMENT: usize = 8;

/// Cache-line alignment, selected via [`ArenaConfig::align64`].
pub const WIDE_ALIGNMENT: usize = 64;

/// Failure modes for arena operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaAllocError {
    /// The current zone (or the arena as a whole) has no room left.
    OutOfCapacity,
    /// `add_zone` was called after [`MAX_ZONES`] zones already exist.
    TooManyZones,
    /// An argument violated a documented precondition (e.g. non-power-of-two alignment).
    BadArg,
}

impl fmt::Display for ArenaAllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfCapacity => write!(f, "arena out of capacity"),
            Self::TooManyZones => write!(f, "arena already has the maximum number of zones"),
            Self::BadArg => write!(f, "invalid argument to arena operation"),
        }
    }
}

impl std::error::Error for ArenaAllocError {}

/// Configuration flags for an [`Arena`].
///
/// Mirrors the configuration surface enumerated for the allocator: callers
/// compose this with [`Default`] and override only the flags they need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Zero newly returned bytes (not padding) on every allocation.
    pub zero_on_alloc: bool,
    /// Zero the used region of the buffer on `reset`.
    pub zero_on_reset: bool,
    /// Track allocation statistics beyond the always-available counters.
    pub stats_enabled: bool,
    /// Hint that this arena will be wrapped in a [`SyncArena`].
    pub thread_safe: bool,
    /// Perform additional bounds assertions on the allocation hot path.
    pub overflow_check: bool,
    /// Use [`WIDE_ALIGNMENT`] instead of [`DEFAULT_ALIGNMENT`] as the default.
    pub align64: bool,
    /// Hint that this arena is short-lived scratch space.
    pub temp: bool,
    /// Hint that the backing pages should be pre-faulted at construction.
    pub prefault: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            zero_on_alloc: false,
            zero_on_reset: false,
            stats_enabled: true,
            thread_safe: false,
            overflow_check: true,
            align64: false,
            temp: false,
            prefault: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Zone {
    offset: usize,
    size: usize,
    used: usize,
}

impl Zone {
    const EMPTY: Zone = Zone { offset: 0, size: 0, used: 0 };
}

/// Totals reported by [`Arena::info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaInfo {
    /// Total bytes owned by the arena.
    pub capacity: usize,
    /// Bytes currently in use across all zones.
    pub used: usize,
    /// High-water mark of `used` since the last reset.
    pub peak: usize,
    /// Number of zones currently carved out of the region.
    pub zone_count: usize,
    /// Number of successful allocations since the last reset.
    pub allocation_count: u64,
}

impl ArenaInfo {
    /// Fraction of capacity currently in use, in `[0.0, 1.0]`.
    #[must_use]
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.used as f64 / self.capacity as f64
        }
    }
}

/// A frozen arena cursor, restorable with [`Arena::restore`].
///
/// Valid only against the arena that produced it, and only while no `reset`
/// or lower `restore` has happened in between.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    used: usize,
    current_zone: usize,
    zone_count: usize,
    zone_used: [usize; MAX_ZONES],
    allocation_count: u64,
}

/// A fixed-capacity, multi-zone bump allocator.
///
/// `Arena` owns one contiguous byte buffer for its entire lifetime; it never
/// grows. Allocation is a bump of the current zone's cursor; deallocation is
/// bulk-only, via [`Arena::reset`] or [`Arena::restore`].
pub struct Arena {
    buffer: Box<[u8]>,
    used: usize,
    peak: usize,
    align: usize,
    zones: [Zone; MAX_ZONES],
    zone_count: usize,
    current_zone: usize,
    allocation_count: u64,
    config: ArenaConfig,
}

impl Arena {
    /// Creates an arena owning exactly `capacity` bytes, with a single zone
    /// spanning the whole region and default configuration.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_config(capacity, ArenaConfig::default())
    }

    /// Creates an arena with explicit configuration.
    #[must_use]
    pub fn with_config(capacity: usize, config: ArenaConfig) -> Self {
        let align = if config.align64 { WIDE_ALIGNMENT } else { DEFAULT_ALIGNMENT };
        let buffer = vec![0u8; capacity].into_boxed_slice();
        let mut zones = [Zone::EMPTY; MAX_ZONES];
        zones[0] = Zone { offset: 0, size: capacity, used: 0 };
        Self {
            buffer,
            used: 0,
            peak: 0,
            align,
            zones,
            zone_count: 1,
            current_zone: 0,
            allocation_count: 0,
            config,
        }
    }

    /// Total capacity owned by this arena, in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Base address of the owned buffer.
    ///
    /// Callers that stash `(offset, len)` pairs instead of raw pointers (the
    /// string interner does this via [`crate::stringref::StringRef`]) use
    /// this to reconstruct a pointer, and [`Arena::slice_at`] to reconstruct
    /// a slice.
    #[must_use]
    pub fn base_ptr(&self) -> *const u8 {
        self.buffer.as_ptr()
    }

    /// Reconstructs a byte slice view of a previously allocated region.
    ///
    /// # Safety
    ///
    /// `offset + len` must be within the arena's capacity, and must name a
    /// region returned by this arena's own allocation methods (or a subrange
    /// of one) that has not since been invalidated by `reset` or `restore`.
    #[must_use]
    pub unsafe fn slice_at(&self, offset: usize, len: usize) -> &[u8] {
        // SAFETY: forwarded to the caller's own safety obligations.
        unsafe { std::slice::from_raw_parts(self.buffer.as_ptr().add(offset), len) }
    }

    /// Allocates `size` bytes at the arena's configured alignment from the
    /// current zone.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaAllocError::OutOfCapacity`] if the current zone cannot
    /// satisfy the request; no partial mutation occurs on failure.
    #[inline(always)]
    pub fn alloc(&mut self, size: usize) -> Result<NonNull<u8>, ArenaAllocError> {
        self.alloc_aligned(size, self.align)
    }

    /// Allocates `size` bytes aligned to `alignment` (a power of two) from
    /// the current zone. Padding needed to satisfy `alignment` is charged
    /// against the zone's budget.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaAllocError::BadArg`] if `alignment` is not a power of
    /// two, or [`ArenaAllocError::OutOfCapacity`] if the zone cannot fit the
    /// padded request.
    #[inline(always)]
    pub fn alloc_aligned(
        &mut self,
        size: usize,
        alignment: usize,
    ) -> Result<NonNull<u8>, ArenaAllocError> {
        if alignment == 0 || !alignment.is_power_of_two() {
            return Err(ArenaAllocError::BadArg);
        }

        let zone = self.zones[self.current_zone];
        let base_addr = self.buffer.as_ptr() as usize + zone.offset;
        let cursor_addr = base_addr + zone.used;
        let aligned_addr = (cursor_addr + alignment - 1) & !(alignment - 1);
        let padding = aligned_addr - cursor_addr;
        let aligned_size = (size + alignment - 1) & !(alignment - 1);
        let total = padding + aligned_size;

        if zone.used + total > zone.size {
            return Err(ArenaAllocError::OutOfCapacity);
        }

        let zone_idx = self.current_zone;
        self.zones[zone_idx].used += total;
        self.used += total;
        self.allocation_count += 1;
        if self.used > self.peak {
            self.peak = self.used;
        }

        let offset_in_buffer = aligned_addr - self.buffer.as_ptr() as usize;
        // SAFETY: offset_in_buffer + size <= buffer.len() by the capacity
        // check above; the arena exclusively owns this buffer.
        let ptr = unsafe { self.buffer.as_mut_ptr().add(offset_in_buffer) };
        if self.config.zero_on_alloc {
            // SAFETY: [ptr, ptr+size) was just reserved and is within bounds.
            unsafe { std::ptr::write_bytes(ptr, 0, size) };
        }

        // SAFETY: ptr is derived from buffer's allocation, hence non-null.
        Ok(unsafe { NonNull::new_unchecked(ptr) })
    }

    /// Allocates space for, and writes, a single `T`.
    ///
    /// Returns a raw typed pointer rather than a borrowed reference: the
    /// arena is type-erased at the byte level (see the allocation-interface
    /// redesign note), and the typed view is a thin construct the caller
    /// reconstructs as needed, the way interned strings are resolved back
    /// from raw bytes.
    ///
    /// # Errors
    ///
    /// Propagates [`ArenaAllocError`] from the underlying `alloc_aligned`.
    pub fn alloc_value<T>(&mut self, value: T) -> Result<NonNull<T>, ArenaAllocError> {
        let size = std::mem::size_of::<T>();
        let align = std::mem::align_of::<T>().max(self.align);
        let ptr = self.alloc_aligned(size, align)?;
        let typed = ptr.cast::<T>();
        // SAFETY: typed points to size_of::<T>() fresh, aligned bytes.
        unsafe { std::ptr::write(typed.as_ptr(), value) };
        Ok(typed)
    }

    /// Copies `values` into a freshly allocated, contiguous slice.
    ///
    /// # Errors
    ///
    /// Propagates [`ArenaAllocError`] from the underlying `alloc_aligned`.
    pub fn alloc_slice_copy<T: Copy>(&mut self, values: &[T]) -> Result<NonNull<[T]>, ArenaAllocError> {
        let size = std::mem::size_of::<T>() * values.len();
        let align = std::mem::align_of::<T>().max(self.align);
        let ptr = self.alloc_aligned(size, align)?;
        let typed = ptr.cast::<T>();
        // SAFETY: typed points to size_of::<T>() * values.len() fresh bytes;
        // values is a distinct, live slice.
        unsafe { std::ptr::copy_nonoverlapping(values.as_ptr(), typed.as_ptr(), values.len()) };
        Ok(NonNull::slice_from_raw_parts(typed, values.len()))
    }

    /// Resets the bump cursor of every zone to zero, releasing all
    /// allocations at once. If `zero_on_reset` is configured, the previously
    /// used region is wiped first.
    pub fn reset(&mut self) {
        if self.config.zero_on_reset && self.used > 0 {
            // SAFETY: [0, used) was previously allocated and is in bounds.
            unsafe { std::ptr::write_bytes(self.buffer.as_mut_ptr(), 0, self.used) };
        }
        for zone in &mut self.zones[..self.zone_count] {
            zone.used = 0;
        }
        self.used = 0;
        self.current_zone = 0;
        self.allocation_count = 0;
    }

    /// Freezes the current cursor, zone selection, and per-zone usage.
    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        let mut zone_used = [0usize; MAX_ZONES];
        zone_used[..self.zone_count]
            .copy_from_slice(&self.zones[..self.zone_count].iter().map(|z| z.used).collect::<Vec<_>>());
        Checkpoint {
            used: self.used,
            current_zone: self.current_zone,
            zone_count: self.zone_count,
            zone_used,
            allocation_count: self.allocation_count,
        }
    }

    /// Restores the arena to a previously taken [`Checkpoint`], releasing
    /// everything allocated since.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.used = checkpoint.used;
        self.current_zone = checkpoint.current_zone;
        self.allocation_count = checkpoint.allocation_count;
        for (zone, &used) in self.zones[..checkpoint.zone_count].iter_mut().zip(&checkpoint.zone_used) {
            zone.used = used;
        }
    }

    /// Carves a new zone of `bytes` out of the unused tail of the
    /// most-recently-added zone, and makes it the current zone.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaAllocError::TooManyZones`] if [`MAX_ZONES`] zones
    /// already exist, or [`ArenaAllocError::OutOfCapacity`] if the last
    /// zone's unused tail is smaller than `bytes`.
    pub fn add_zone(&mut self, bytes: usize) -> Result<usize, ArenaAllocError> {
        if self.zone_count >= MAX_ZONES {
            return Err(ArenaAllocError::TooManyZones);
        }
        let last_idx = self.zone_count - 1;
        let last = self.zones[last_idx];
        let available = last.size - last.used;
        if bytes > available {
            return Err(ArenaAllocError::OutOfCapacity);
        }
        self.zones[last_idx].size -= bytes;
        let new_zone = Zone { offset: last.offset + (last.size - bytes), size: bytes, used: 0 };
        let new_id = self.zone_count;
        self.zones[new_id] = new_zone;
        self.zone_count += 1;
        self.current_zone = new_id;
        Ok(new_id)
    }

    /// Switches the zone subsequent allocations target.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaAllocError::BadArg`] if `zone_id` does not name an
    /// existing zone.
    pub fn switch_zone(&mut self, zone_id: usize) -> Result<(), ArenaAllocError> {
        if zone_id >= self.zone_count {
            return Err(ArenaAllocError::BadArg);
        }
        self.current_zone = zone_id;
        Ok(())
    }

    /// Returns current totals: capacity, used, peak, zone count, allocation count.
    #[must_use]
    pub fn info(&self) -> ArenaInfo {
        ArenaInfo {
            capacity: self.buffer.len(),
            used: self.used,
            peak: self.peak,
            zone_count: self.zone_count,
            allocation_count: self.allocation_count,
        }
    }
}

/// A `Mutex`-wrapped [`Arena`] for the `thread_safe` configuration flag.
///
/// This is a correctness feature, not a performance one: the 7-cycle budget
/// is defined only for the unlocked [`Arena`] path.
pub struct SyncArena {
    inner: Mutex<Arena>,
}

impl SyncArena {
    /// Wraps a freshly constructed arena of the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { inner: Mutex::new(Arena::new(capacity)) }
    }

    /// Wraps an existing arena.
    #[must_use]
    pub fn wrap(arena: Arena) -> Self {
        Self { inner: Mutex::new(arena) }
    }

    /// Runs `f` with exclusive access to the wrapped arena.
    pub fn with<R>(&self, f: impl FnOnce(&mut Arena) -> R) -> R {
        let mut guard = self.inner.lock().expect("arena mutex poisoned");
        f(&mut guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s1_arena_basics() {
        let mut arena = Arena::new(1024);
        arena.alloc(64).unwrap();
        arena.alloc(32).unwrap();
        assert_eq!(arena.info().used, 96);

        assert_eq!(arena.alloc(1024 - 96 + 1), Err(ArenaAllocError::OutOfCapacity));

        arena.reset();
        assert_eq!(arena.info().used, 0);
    }

    #[test]
    fn monotonicity_without_reset() {
        let mut arena = Arena::new(4096);
        let mut last_used = 0;
        for size in [1usize, 7, 33, 65, 129] {
            arena.alloc(size).unwrap();
            let info = arena.info();
            assert!(info.used >= last_used);
            assert!(info.peak >= info.used);
            last_used = info.used;
        }
    }

    #[test]
    fn alignment_is_respected() {
        let mut arena = Arena::new(4096);
        for size in [1usize, 3, 5, 17] {
            let ptr = arena.alloc(size).unwrap();
            assert_eq!(ptr.as_ptr() as usize % DEFAULT_ALIGNMENT, 0);
        }
    }

    #[test]
    fn allocations_never_overlap() {
        let mut arena = Arena::new(4096);
        let mut regions: Vec<(usize, usize)> = Vec::new();
        for size in [13usize, 29, 5, 101, 7] {
            let ptr = arena.alloc(size).unwrap().as_ptr() as usize;
            for &(start, len) in &regions {
                assert!(ptr >= start + len || ptr + size <= start);
            }
            regions.push((ptr, size));
        }
    }

    #[test]
    fn checkpoint_round_trip() {
        let mut arena = Arena::new(4096);
        arena.alloc(16).unwrap();
        let before = arena.info();
        let checkpoint = arena.checkpoint();

        arena.alloc(200).unwrap();
        arena.alloc(50).unwrap();
        arena.restore(checkpoint);

        let after = arena.info();
        assert_eq!(before.used, after.used);
        assert_eq!(before.allocation_count, after.allocation_count);
    }

    #[test]
    fn zero_on_alloc_zeroes_requested_bytes_only() {
        let config = ArenaConfig { zero_on_alloc: true, ..ArenaConfig::default() };
        let mut arena = Arena::with_config(4096, config);
        let ptr = arena.alloc(8).unwrap();
        // SAFETY: ptr is valid for 8 bytes, just allocated.
        let bytes = unsafe { std::slice::from_raw_parts(ptr.as_ptr(), 8) };
        assert_eq!(bytes, &[0u8; 8]);
    }

    #[test]
    fn add_zone_and_switch_zone() {
        let mut arena = Arena::new(256);
        let zone_id = arena.add_zone(64).unwrap();
        assert_eq!(zone_id, 1);

        arena.alloc(32).unwrap();
        let after_zone1 = arena.info();

        arena.switch_zone(0).unwrap();
        arena.alloc(16).unwrap();
        let after_zone0 = arena.info();

        assert_eq!(after_zone0.used, after_zone1.used + 16);
    }

    #[test]
    fn add_zone_fails_past_capacity() {
        let mut arena = Arena::new(64);
        assert_eq!(arena.add_zone(128), Err(ArenaAllocError::OutOfCapacity));
    }

    #[test]
    fn too_many_zones_rejected() {
        let mut arena = Arena::new(4096);
        for _ in 0..(MAX_ZONES - 1) {
            arena.add_zone(16).unwrap();
        }
        assert_eq!(arena.add_zone(16), Err(ArenaAllocError::TooManyZones));
    }

    #[test]
    fn sync_arena_allows_concurrent_threads() {
        use std::sync::Arc;
        use std::thread;

        let arena = Arc::new(SyncArena::new(1 << 16));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let arena = Arc::clone(&arena);
                thread::spawn(move || {
                    arena.with(|a| a.alloc(8 + i).unwrap());
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(arena.with(|a| a.info().allocation_count) == 8);
    }
}
