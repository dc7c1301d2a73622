/// Root-handle boilerplate. Cloning a handle adds a root to its slot; dropping one releases it.
/// Dropping the last root never reclaims the slot on its own, it only makes the cell garbage for
/// a later sweep.
macro_rules! impl_rooted {
    ($handle:ident) => {
        impl Clone for $handle {
            fn clone(&self) -> Self {
                self.runtime.with_heap(|heap| heap.retain(self.slot));
                Self {
                    slot: self.slot,
                    runtime: self.runtime.clone(),
                }
            }
        }

        impl Drop for $handle {
            fn drop(&mut self) {
                self.runtime.with_heap(|heap| heap.release(self.slot));
            }
        }
    };
}

pub(crate) use impl_rooted;
