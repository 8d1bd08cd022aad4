//! Reactive value cells
//!
//! A compact signal store: typed value cells keyed by slotmap ids, with
//! watcher callbacks for change notification. Widgets bind their committed
//! value (the selected option, band offsets) to a [`State`] cell owned by
//! the host; the host watches the cell to re-render.
//!
//! Watchers are invoked after the store lock is released, so a watcher may
//! freely read any cell (including the one that just changed).
//!
//! # Example
//!
//! ```rust
//! use marquee_core::reactive::{SignalStore, State};
//!
//! let store = SignalStore::new_shared();
//! let fruit: State<String> = State::create(&store, "apple".to_string());
//!
//! fruit.set("cherry".to_string());
//! assert_eq!(fruit.get(), "cherry");
//! ```

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::any::Any;
use std::sync::{Arc, Mutex};

new_key_type! {
    /// Unique identifier for a signal
    pub struct SignalId;
}

/// Handle for removing a registered watcher
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatcherId(u64);

/// Change-notification callback
pub type Watcher = Arc<dyn Fn() + Send + Sync>;

/// A typed signal handle (cheap to copy)
#[derive(Debug)]
pub struct Signal<T> {
    id: SignalId,
    _marker: std::marker::PhantomData<T>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Signal<T> {}

impl<T> Signal<T> {
    /// Get the signal's internal ID
    pub fn id(&self) -> SignalId {
        self.id
    }
}

/// Internal signal node storage
struct SignalNode {
    /// The signal value (type-erased)
    value: Box<dyn Any + Send>,
    /// Version counter for change detection
    version: u64,
    /// Watchers to notify on change
    watchers: SmallVec<[(WatcherId, Watcher); 2]>,
}

/// Store of all signal cells
pub struct SignalStore {
    signals: SlotMap<SignalId, SignalNode>,
    next_watcher: u64,
}

impl SignalStore {
    pub fn new() -> Self {
        Self {
            signals: SlotMap::with_key(),
            next_watcher: 0,
        }
    }

    /// Create a new store wrapped for sharing
    pub fn new_shared() -> SharedSignals {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Create a new signal with an initial value
    pub fn create_signal<T: Send + 'static>(&mut self, initial: T) -> Signal<T> {
        let id = self.signals.insert(SignalNode {
            value: Box::new(initial),
            version: 0,
            watchers: SmallVec::new(),
        });
        Signal {
            id,
            _marker: std::marker::PhantomData,
        }
    }

    /// Get the current value of a signal
    pub fn get<T: Clone + 'static>(&self, signal: Signal<T>) -> Option<T> {
        self.signals
            .get(signal.id)
            .and_then(|node| node.value.downcast_ref::<T>().cloned())
    }

    /// Set the value of a signal, returning the watchers to notify.
    ///
    /// The caller invokes the returned watchers once the store lock is
    /// dropped; invoking them while holding the lock would deadlock any
    /// watcher that reads a cell.
    #[must_use = "returned watchers must be invoked after releasing the store lock"]
    pub fn set<T: Send + 'static>(&mut self, signal: Signal<T>, value: T) -> Vec<Watcher> {
        match self.signals.get_mut(signal.id) {
            Some(node) => {
                node.value = Box::new(value);
                node.version += 1;
                node.watchers.iter().map(|(_, w)| w.clone()).collect()
            }
            None => {
                tracing::debug!("set on a removed signal; value dropped");
                Vec::new()
            }
        }
    }

    /// Get the version of a signal (for change detection)
    pub fn version(&self, id: SignalId) -> Option<u64> {
        self.signals.get(id).map(|n| n.version)
    }

    /// Register a change watcher on a signal
    pub fn watch(&mut self, id: SignalId, watcher: Watcher) -> WatcherId {
        let wid = WatcherId(self.next_watcher);
        self.next_watcher += 1;
        if let Some(node) = self.signals.get_mut(id) {
            node.watchers.push((wid, watcher));
        }
        wid
    }

    /// Remove a previously registered watcher
    pub fn unwatch(&mut self, id: SignalId, watcher: WatcherId) {
        if let Some(node) = self.signals.get_mut(id) {
            node.watchers.retain(|(wid, _)| *wid != watcher);
        }
    }

    /// Drop a signal cell and all of its watchers
    pub fn remove_signal(&mut self, id: SignalId) {
        self.signals.remove(id);
    }
}

impl Default for SignalStore {
    fn default() -> Self {
        Self::new()
    }
}

pub type SharedSignals = Arc<Mutex<SignalStore>>;

/// A bound state value with direct get/set methods
///
/// This is the primary API for widget state. It pairs a signal handle with
/// the shared store so reads and writes need no explicit locking at call
/// sites.
#[derive(Clone)]
pub struct State<T> {
    signal: Signal<T>,
    store: SharedSignals,
}

impl<T: Clone + Send + 'static> State<T> {
    /// Allocate a fresh cell in the store
    pub fn create(store: &SharedSignals, initial: T) -> Self {
        let signal = store.lock().unwrap().create_signal(initial);
        Self {
            signal,
            store: Arc::clone(store),
        }
    }

    /// Wrap an existing signal
    pub fn new(signal: Signal<T>, store: SharedSignals) -> Self {
        Self { signal, store }
    }

    /// Get the current value
    pub fn get(&self) -> T
    where
        T: Default,
    {
        self.store
            .lock()
            .unwrap()
            .get(self.signal)
            .unwrap_or_default()
    }

    /// Get the current value, returning None if the cell was removed
    pub fn try_get(&self) -> Option<T> {
        self.store.lock().unwrap().get(self.signal)
    }

    /// Set a new value and notify watchers
    pub fn set(&self, value: T) {
        let watchers = self.store.lock().unwrap().set(self.signal, value);
        for watcher in watchers {
            watcher();
        }
    }

    /// Update the value using a function
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        let current = self.try_get();
        if let Some(current) = current {
            self.set(f(current));
        }
    }

    /// Register a change watcher; returns a handle for removal
    pub fn on_change(&self, watcher: impl Fn() + Send + Sync + 'static) -> WatcherId {
        self.store
            .lock()
            .unwrap()
            .watch(self.signal.id(), Arc::new(watcher))
    }

    /// Remove a watcher registered with [`State::on_change`]
    pub fn remove_watcher(&self, watcher: WatcherId) {
        self.store.lock().unwrap().unwatch(self.signal.id(), watcher);
    }

    /// Get the signal ID (for change detection)
    pub fn signal_id(&self) -> SignalId {
        self.signal.id()
    }
}
