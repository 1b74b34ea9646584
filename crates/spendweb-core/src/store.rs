//! Process-wide application state.
//!
//! Slices are registered additively at startup. Each slice owns its state
//! and its reducer; the store only routes by type.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::{CoreError, CoreResult};

/// A piece of application state together with its reducer
pub trait Slice: Send + Sync + 'static {
    type Action;

    /// Name used in logs and registration errors
    const NAME: &'static str;

    fn reduce(&mut self, action: Self::Action);
}

struct Entry {
    name: &'static str,
    state: Box<dyn Any + Send + Sync>,
}

#[derive(Default)]
pub struct Store {
    slices: RwLock<HashMap<TypeId, Entry>>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("slices", &self.slice_names()).finish()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slice. Each slice type may be registered once.
    pub fn register<S: Slice>(&self, slice: S) -> CoreResult<()> {
        let mut slices = self.slices.write().unwrap_or_else(PoisonError::into_inner);
        if slices.contains_key(&TypeId::of::<S>()) {
            return Err(CoreError::DuplicateSlice { name: S::NAME.to_string() });
        }
        slices.insert(TypeId::of::<S>(), Entry { name: S::NAME, state: Box::new(slice) });
        log::debug!("Registered store slice '{}'", S::NAME);
        Ok(())
    }

    /// Read a slice through `f`; `None` when the slice is not registered
    pub fn select<S: Slice, R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        let slices = self.slices.read().unwrap_or_else(PoisonError::into_inner);
        slices
            .get(&TypeId::of::<S>())
            .and_then(|entry| entry.state.downcast_ref::<S>())
            .map(f)
    }

    /// Run `action` through the slice's reducer.
    ///
    /// Returns false when the slice is not registered.
    pub fn dispatch<S: Slice>(&self, action: S::Action) -> bool {
        let mut slices = self.slices.write().unwrap_or_else(PoisonError::into_inner);
        match slices.get_mut(&TypeId::of::<S>()).and_then(|entry| entry.state.downcast_mut::<S>()) {
            Some(slice) => {
                slice.reduce(action);
                true
            }
            None => {
                log::warn!("Dispatch to unregistered slice '{}'", S::NAME);
                false
            }
        }
    }

    pub fn slice_count(&self) -> usize {
        self.slices.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn slice_names(&self) -> Vec<&'static str> {
        let slices = self.slices.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<_> = slices.values().map(|entry| entry.name).collect();
        names.sort_unstable();
        names
    }

    /// Drop every slice
    pub fn teardown(&self) {
        let mut slices = self.slices.write().unwrap_or_else(PoisonError::into_inner);
        log::info!("Tearing down store ({} slices)", slices.len());
        slices.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        value: i64,
    }

    impl Slice for Counter {
        type Action = i64;
        const NAME: &'static str = "counter";

        fn reduce(&mut self, action: i64) {
            self.value += action;
        }
    }

    #[derive(Default)]
    struct Flags {
        dark_mode: bool,
    }

    impl Slice for Flags {
        type Action = bool;
        const NAME: &'static str = "flags";

        fn reduce(&mut self, action: bool) {
            self.dark_mode = action;
        }
    }

    #[test]
    fn test_store_starts_empty() {
        let store = Store::new();
        assert_eq!(store.slice_count(), 0);
        assert_eq!(store.select::<Counter, _>(|c| c.value), None);
        assert!(!store.dispatch::<Counter>(1));
    }

    #[test]
    fn test_slices_are_independent() {
        let store = Store::new();
        store.register(Counter::default()).unwrap();
        store.register(Flags::default()).unwrap();

        assert!(store.dispatch::<Counter>(2));
        assert!(store.dispatch::<Counter>(3));
        assert!(store.dispatch::<Flags>(true));

        assert_eq!(store.select::<Counter, _>(|c| c.value), Some(5));
        assert_eq!(store.select::<Flags, _>(|f| f.dark_mode), Some(true));
        assert_eq!(store.slice_names(), vec!["counter", "flags"]);
    }

    #[test]
    fn test_duplicate_registration() {
        let store = Store::new();
        store.register(Counter::default()).unwrap();
        let err = store.register(Counter { value: 9 }).unwrap_err();
        assert_eq!(err, CoreError::DuplicateSlice { name: "counter".to_string() });
        assert_eq!(store.select::<Counter, _>(|c| c.value), Some(0));
    }

    #[test]
    fn test_teardown() {
        let store = Store::new();
        store.register(Counter::default()).unwrap();
        store.teardown();
        assert_eq!(store.slice_count(), 0);
    }
}
