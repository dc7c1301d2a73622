use crate::{
    core::Container,
    domain::Value,
    runtime::{
        generator::{CloseHook, GenRef, Generator},
        heap::{Cell, CellRef, Heap, HeapStats, DEFAULT_GC_THRESHOLD},
    },
};

/// The shared face of the heap. Cloning a `Runtime` is cheap and every clone drives the same
/// slot table, which is what lets a close hook spawn fresh generators while a sweep is mid-flight.
#[derive(Clone)]
pub struct Runtime {
    heap: Container<Heap>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_gc_threshold(DEFAULT_GC_THRESHOLD)
    }

    pub fn with_gc_threshold(gc_threshold: usize) -> Self {
        Self {
            heap: Container::new(Heap::new(gc_threshold)),
        }
    }

    /// Allocate a throwaway cell. Every allocation counts toward the pressure that triggers the
    /// next sweep.
    pub fn alloc(&self, value: Value) -> CellRef {
        let slot = self.with_heap(|heap| heap.alloc(Cell::Plain(value)));
        self.maybe_collect();
        CellRef::new(slot, self.clone())
    }

    /// Spawn a generator staged with the given yields and no close hook.
    pub fn spawn(&self, staged: Vec<Value>) -> GenRef {
        self.spawn_cell(Generator::new(staged))
    }

    /// Spawn a generator whose close hook is guaranteed to run exactly once: on exhaustion, on
    /// explicit close, or when a sweep reclaims it after abandonment.
    pub fn spawn_with_close<F>(&self, staged: Vec<Value>, hook: F) -> GenRef
    where
        F: FnOnce(&Runtime) + 'static,
    {
        self.spawn_cell(Generator::with_close_hook(staged, Box::new(hook)))
    }

    /// Sweep now, regardless of pressure. The close hooks of reclaimed generators run after the
    /// doomed set is detached, so they are free to allocate and spawn; anything they abandon in
    /// turn waits for a later sweep rather than extending this one.
    pub fn collect(&self) {
        let hooks = {
            let mut heap = self.heap.borrow_mut();
            if heap.is_sweeping() {
                return;
            }
            heap.begin_sweep()
        };

        for hook in hooks {
            self.run_hook(hook);
        }

        self.heap.borrow_mut().end_sweep();
    }

    pub fn live_cells(&self) -> usize {
        self.heap.borrow().live_cells()
    }

    pub fn stats(&self) -> HeapStats {
        self.heap.borrow().stats()
    }

    pub(crate) fn with_heap<R>(&self, f: impl FnOnce(&mut Heap) -> R) -> R {
        f(&mut self.heap.borrow_mut())
    }

    pub(crate) fn run_hook(&self, hook: CloseHook) {
        self.with_heap(|heap| heap.record_hook_run());
        hook(self);
    }

    fn spawn_cell(&self, generator: Generator) -> GenRef {
        let slot = self.with_heap(|heap| heap.alloc(Cell::Generator(generator)));
        self.maybe_collect();
        GenRef::new(slot, self.clone())
    }

    fn maybe_collect(&self) {
        let due = self.heap.borrow().sweep_due();
        if due {
            self.collect();
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
