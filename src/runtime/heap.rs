use crate::{
    core::{log, LogLevel},
    domain::Value,
    runtime::{
        generator::{CloseHook, Generator},
        macros::*,
        Runtime,
    },
};

/// Allocations between pressure-driven sweeps. Low enough that a burst of throwaway allocations
/// forces several sweeps, high enough that ordinary use is not dominated by sweeping.
pub(crate) const DEFAULT_GC_THRESHOLD: usize = 4096;

/// What a heap slot holds: inert churn data, or a generator with its suspension state.
pub(crate) enum Cell {
    Plain(Value),
    Generator(Generator),
}

struct Slot {
    cell: Cell,
    roots: usize,
}

/// Counters the sweep keeps as it goes. Tests read these to pin down when reclamation happened.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct HeapStats {
    pub sweeps: usize,
    pub reclaimed: usize,
    pub hooks_run: usize,
}

/// A slot table of root-counted cells. A cell whose root count hits zero is not touched right
/// away; it sits as garbage until allocation pressure (or an explicit collect) sweeps it. That
/// delay between abandonment and reclamation is the window the close-hook machinery lives in.
pub(crate) struct Heap {
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    allocated_since_sweep: usize,
    gc_threshold: usize,
    sweeping: bool,
    stats: HeapStats,
}

impl Heap {
    pub fn new(gc_threshold: usize) -> Self {
        Self {
            slots: vec![],
            free: vec![],
            allocated_since_sweep: 0,
            gc_threshold: gc_threshold.max(1),
            sweeping: false,
            stats: HeapStats::default(),
        }
    }

    /// Place a cell in a slot with a single root (the handle about to be returned to the caller).
    pub fn alloc(&mut self, cell: Cell) -> usize {
        self.allocated_since_sweep += 1;

        let slot = Slot { cell, roots: 1 };
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(slot);
                index
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        }
    }

    pub fn retain(&mut self, slot: usize) {
        self.slot_mut(slot).roots += 1;
    }

    pub fn release(&mut self, slot: usize) {
        self.slot_mut(slot).roots -= 1;
    }

    /// Enough allocations have happened since the last sweep that the next safe point should
    /// collect. Never true mid-sweep: garbage created by a running close hook waits its turn.
    pub fn sweep_due(&self) -> bool {
        !self.sweeping && self.allocated_since_sweep >= self.gc_threshold
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweeping
    }

    /// Detach every unrooted cell, freeing its slot, and hand back the close hooks of the live
    /// generators among them. The caller runs those hooks once no heap borrow is held; the sweep
    /// stays marked in-progress until [`Heap::end_sweep`].
    pub fn begin_sweep(&mut self) -> Vec<CloseHook> {
        self.sweeping = true;
        self.allocated_since_sweep = 0;
        self.stats.sweeps += 1;

        let doomed: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, entry)| matches!(entry, Some(slot) if slot.roots == 0))
            .map(|(index, _)| index)
            .collect();

        let mut hooks = vec![];
        for index in &doomed {
            let slot = self.slots[*index].take().unwrap();
            self.free.push(*index);
            self.stats.reclaimed += 1;

            if let Cell::Generator(mut generator) = slot.cell {
                if let Some(hook) = generator.dispose() {
                    hooks.push(hook);
                }
            }
        }

        log(LogLevel::Debug, || {
            format!(
                "sweep {}: reclaimed {} cells, {} close hooks to run",
                self.stats.sweeps,
                doomed.len(),
                hooks.len()
            )
        });

        hooks
    }

    pub fn end_sweep(&mut self) {
        self.sweeping = false;
    }

    pub fn record_hook_run(&mut self) {
        self.stats.hooks_run += 1;
    }

    pub fn generator_mut(&mut self, slot: usize) -> &mut Generator {
        match &mut self.slot_mut(slot).cell {
            Cell::Generator(generator) => generator,
            Cell::Plain(_) => panic!("slot {slot} does not hold a generator!"),
        }
    }

    pub fn plain_value(&self, slot: usize) -> Value {
        match &self.slot(slot).cell {
            Cell::Plain(value) => value.clone(),
            Cell::Generator(_) => panic!("slot {slot} does not hold a plain cell!"),
        }
    }

    pub fn live_cells(&self) -> usize {
        self.slots.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn stats(&self) -> HeapStats {
        self.stats
    }

    fn slot(&self, slot: usize) -> &Slot {
        self.slots[slot].as_ref().unwrap()
    }

    fn slot_mut(&mut self, slot: usize) -> &mut Slot {
        self.slots[slot].as_mut().unwrap()
    }
}

/// A rooted handle to a plain cell. The churn loop creates and immediately drops these to build
/// reclaimable garbage.
pub struct CellRef {
    slot: usize,
    runtime: Runtime,
}

impl CellRef {
    pub(crate) fn new(slot: usize, runtime: Runtime) -> Self {
        Self { slot, runtime }
    }

    pub fn value(&self) -> Value {
        self.runtime.with_heap(|heap| heap.plain_value(self.slot))
    }
}

impl_rooted!(CellRef);
