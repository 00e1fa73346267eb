//! Single-value publish/subscribe cell.
//!
//! [`Observable<T>`] keeps its value in `Rc<RefCell<..>>`. Every mutation
//! bumps the version and notifies live subscribers in registration order,
//! after the borrow is released, so a callback always sees a complete value
//! and may itself mutate the observable.
//!
//! A mutation made from inside a callback is queued behind the deliveries
//! already in flight, so every subscriber sees the values in the order they
//! were set and the last one it sees is the current value.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct Inner<T> {
    value: T,
    version: u64,
    subscribers: Vec<CallbackWeak<T>>,
    /// Deliveries not yet made, in order.
    pending: VecDeque<(CallbackRc<T>, T)>,
    /// Set while the outermost `notify` drains `pending`.
    draining: bool,
}

/// Cloning yields another handle to the same value and subscriber list.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                subscribers: Vec::new(),
                pending: VecDeque::new(),
                draining: false,
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value and notify.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Mutate in place and notify.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut inner = self.inner.borrow_mut();
            f(&mut inner.value);
            inner.version += 1;
        }
        self.notify();
    }

    /// Register `callback`. It runs once right away with the current value,
    /// then after every mutation until the returned guard is dropped.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));

        let current = self.get();
        strong(&current);

        Subscription {
            _guard: Box::new(strong),
        }
    }

    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Registered subscribers, dead ones included until the next notify.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            let callbacks: Vec<CallbackRc<T>> = inner
                .subscribers
                .iter()
                .filter_map(|w| w.upgrade())
                .collect();
            let snapshot = inner.value.clone();
            for cb in callbacks {
                inner.pending.push_back((cb, snapshot.clone()));
            }
            if inner.draining {
                return;
            }
            inner.draining = true;
        }

        let _reset = DrainGuard(self);
        loop {
            let next = self.inner.borrow_mut().pending.pop_front();
            match next {
                Some((cb, value)) => cb(&value),
                None => break,
            }
        }
    }
}

/// Clears the drain state even if a callback panics, so later mutations
/// still notify.
struct DrainGuard<'a, T>(&'a Observable<T>);

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        let mut inner = self.0.inner.borrow_mut();
        inner.pending.clear();
        inner.draining = false;
    }
}

/// Keeps a subscription alive. Dropping it unsubscribes.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
