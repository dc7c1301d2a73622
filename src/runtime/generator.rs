use std::collections::VecDeque;

use crate::{
    domain::{ExecutionError, Value},
    runtime::{macros::*, RunResult, Runtime},
};

/// Cleanup code attached to a generator, guaranteed to run exactly once: on exhaustion, on
/// explicit disposal, or when a sweep reclaims the generator after it was abandoned. The hook
/// receives the runtime so it may allocate, spawn, and drive new generators of its own.
pub type CloseHook = Box<dyn FnOnce(&Runtime)>;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum GenState {
    Created,
    Suspended,
    Finished,
    Closed,
}

/// What a single resume step produced. The close hook travels out of the heap inside this so the
/// caller can run it without holding any heap borrow.
pub(crate) enum Step {
    Yielded(Value),
    Exhausted(Option<CloseHook>),
    Done,
}

/// A suspended computation that hands out its staged values one resume at a time.
pub(crate) struct Generator {
    staged: VecDeque<Value>,
    state: GenState,
    close_hook: Option<CloseHook>,
}

impl Generator {
    pub fn new(staged: Vec<Value>) -> Self {
        Self {
            staged: staged.into(),
            state: GenState::Created,
            close_hook: None,
        }
    }

    pub fn with_close_hook(staged: Vec<Value>, hook: CloseHook) -> Self {
        Self {
            close_hook: Some(hook),
            ..Self::new(staged)
        }
    }

    pub fn state(&self) -> GenState {
        self.state
    }

    /// Take one resume step. The transition to `Finished` detaches the close hook so it runs
    /// exactly once, on this exhaustion.
    pub fn advance(&mut self) -> Step {
        match self.state {
            GenState::Created | GenState::Suspended => match self.staged.pop_front() {
                Some(value) => {
                    self.state = GenState::Suspended;
                    Step::Yielded(value)
                }
                None => {
                    self.state = GenState::Finished;
                    Step::Exhausted(self.close_hook.take())
                }
            },
            GenState::Finished | GenState::Closed => Step::Done,
        }
    }

    /// Abandonment and explicit `close` both land here: detach the hook for its one run and mark
    /// the generator closed. Disposing a finished or already-closed generator is a no-op.
    pub fn dispose(&mut self) -> Option<CloseHook> {
        match self.state {
            GenState::Created | GenState::Suspended => {
                self.state = GenState::Closed;
                self.close_hook.take()
            }
            GenState::Finished | GenState::Closed => None,
        }
    }
}

/// A rooted handle to a generator living on the runtime's heap. As long as any clone of this
/// handle is alive, the generator is reachable and no sweep will touch it.
pub struct GenRef {
    slot: usize,
    runtime: Runtime,
}

impl GenRef {
    pub(crate) fn new(slot: usize, runtime: Runtime) -> Self {
        Self { slot, runtime }
    }

    /// Resume the generator one step. Yields the next staged value, or raises `StopIteration`
    /// once the generator is spent. The first exhaustion runs the close hook before raising.
    pub fn resume(&self) -> RunResult<Value> {
        let step = self
            .runtime
            .with_heap(|heap| heap.generator_mut(self.slot).advance());

        match step {
            Step::Yielded(value) => Ok(value),
            Step::Exhausted(hook) => {
                if let Some(hook) = hook {
                    self.runtime.run_hook(hook);
                }
                Err(ExecutionError::StopIteration)
            }
            Step::Done => Err(ExecutionError::StopIteration),
        }
    }

    /// Dispose of the generator now, running its close hook if still armed. Idempotent.
    pub fn close(&self) {
        let hook = self
            .runtime
            .with_heap(|heap| heap.generator_mut(self.slot).dispose());

        if let Some(hook) = hook {
            self.runtime.run_hook(hook);
        }
    }

    pub fn state(&self) -> GenState {
        self.runtime
            .with_heap(|heap| heap.generator_mut(self.slot).state())
    }
}

impl_rooted!(GenRef);

pub struct GeneratorIterator {
    generator: GenRef,
}

impl GeneratorIterator {
    pub fn new(generator: GenRef) -> Self {
        Self { generator }
    }
}

impl Iterator for GeneratorIterator {
    type Item = Value;

    /// This swallows the `StopIteration` raised on exhaustion. Use [`GenRef::resume`] to surface
    /// it instead.
    fn next(&mut self) -> Option<Self::Item> {
        match self.generator.resume() {
            Ok(value) => Some(value),
            Err(ExecutionError::StopIteration) => None,
        }
    }
}

impl IntoIterator for GenRef {
    type Item = Value;
    type IntoIter = GeneratorIterator;

    fn into_iter(self) -> Self::IntoIter {
        GeneratorIterator::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Storable;

    #[test]
    fn staged_values_come_back_in_order() {
        let runtime = Runtime::new();
        let gen = runtime.spawn(vec![Value::Int(1), Value::Int(2)]);

        assert_eq!(gen.state(), GenState::Created);
        assert_eq!(gen.resume(), Ok(Value::Int(1)));
        assert_eq!(gen.state(), GenState::Suspended);
        assert_eq!(gen.resume(), Ok(Value::Int(2)));
        assert_eq!(gen.resume(), Err(ExecutionError::StopIteration));
        assert_eq!(gen.state(), GenState::Finished);
    }

    #[test]
    fn exhaustion_runs_the_close_hook_exactly_once() {
        let runtime = Runtime::new();
        let runs = 0u32.store();

        let tally = runs.clone();
        let gen = runtime.spawn_with_close(vec![Value::None], move |_: &Runtime| {
            *tally.borrow_mut() += 1;
        });

        assert_eq!(gen.resume(), Ok(Value::None));
        assert_eq!(*runs.borrow(), 0);

        assert_eq!(gen.resume(), Err(ExecutionError::StopIteration));
        assert_eq!(*runs.borrow(), 1);

        // Raises again, but the hook stays spent.
        assert_eq!(gen.resume(), Err(ExecutionError::StopIteration));
        assert_eq!(*runs.borrow(), 1);
    }

    #[test]
    fn close_is_idempotent_and_disarms_resume() {
        let runtime = Runtime::new();
        let runs = 0u32.store();

        let tally = runs.clone();
        let gen = runtime.spawn_with_close(vec![Value::Int(3)], move |_: &Runtime| {
            *tally.borrow_mut() += 1;
        });

        gen.close();
        assert_eq!(gen.state(), GenState::Closed);
        assert_eq!(*runs.borrow(), 1);

        gen.close();
        assert_eq!(*runs.borrow(), 1);

        assert_eq!(gen.resume(), Err(ExecutionError::StopIteration));
        assert_eq!(*runs.borrow(), 1);
    }

    #[test]
    fn iterator_drains_the_generator_and_stops() {
        let runtime = Runtime::new();
        let gen = runtime.spawn(vec![Value::Int(1), Value::Int(2)]);

        let collected: Vec<Value> = gen.into_iter().collect();
        assert_eq!(collected, vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn dropping_a_partially_driven_iterator_leaves_the_hook_armed() {
        let runtime = Runtime::with_gc_threshold(1000);
        let runs = 0u32.store();

        let tally = runs.clone();
        let gen = runtime.spawn_with_close(vec![Value::empty_list()], move |_: &Runtime| {
            *tally.borrow_mut() += 1;
        });

        let mut steps = gen.into_iter();
        assert_eq!(steps.next(), Some(Value::empty_list()));
        drop(steps);

        // Abandonment arms the hook but does not run it; the sweep does.
        assert_eq!(*runs.borrow(), 0);
        runtime.collect();
        assert_eq!(*runs.borrow(), 1);
    }
}
