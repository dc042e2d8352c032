//! # Lock
//! Wrappers around sync locks that only expose the protected data inside a
//! closure, making it impossible to hold a lock over an await.
//!
//! The bounds of every critical section are the call to [`Lock::apply`] or
//! [`Lock::inspect`], so a deadlock requires one of those calls to appear
//! more than once on the stack.
//!
//! A poisoned lock is recovered rather than propagated: the data is only ever
//! mutated through closures that leave it consistent before returning, so a
//! panic in a closure cannot expose a half-applied update.
#![deny(missing_docs)]
#![deny(unsafe_code)]
use std::ops::{Deref, DerefMut};

/// A lock that is guaranteed to be released before an await.
#[derive(Default)]
pub struct Lock<M> {
    mutex: M,
}

/// A lock granting exclusive access.
pub trait Exclusive {
    /// The data stored behind the lock.
    type Data: ?Sized;
    /// The `Guard` returned via [`Exclusive::lock`].
    type Guard<'a>: DerefMut<Target = Self::Data>
    where
        Self: 'a;

    /// Create a new lock with the given data.
    fn new(data: Self::Data) -> Self
    where
        Self::Data: Sized;

    /// Acquire exclusive access.
    fn lock(&self) -> Self::Guard<'_>;
}

/// A lock that can also grant shared, read-only access.
pub trait Shared: Exclusive {
    /// The `Guard` returned via [`Shared::read`].
    type ReadGuard<'a>: Deref<Target = Self::Data>
    where
        Self: 'a;

    /// Acquire shared access.
    fn read(&self) -> Self::ReadGuard<'_>;
}

impl<M> Lock<M>
where
    M: Exclusive,
{
    /// Create a new lock with the given data.
    pub fn new(data: M::Data) -> Self
    where
        M::Data: Sized,
    {
        Lock {
            mutex: Exclusive::new(data),
        }
    }

    /// Apply a function to the data in the lock.
    pub fn apply<U>(&self, f: impl FnOnce(&mut M::Data) -> U) -> U {
        f(&mut self.mutex.lock())
    }
}

impl<M> Lock<M>
where
    M: Shared,
{
    /// Read the data in the lock.
    ///
    /// Any number of readers may inspect the data at once; writers using
    /// [`Lock::apply`] wait for them to finish.
    pub fn inspect<U>(&self, f: impl FnOnce(&M::Data) -> U) -> U {
        f(&self.mutex.read())
    }
}

impl<T> Exclusive for std::sync::Mutex<T> {
    type Data = T;
    type Guard<'a> = std::sync::MutexGuard<'a, Self::Data> where T: 'a;

    fn new(data: T) -> Self {
        std::sync::Mutex::new(data)
    }

    fn lock(&self) -> Self::Guard<'_> {
        self.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<T> Exclusive for std::sync::RwLock<T> {
    type Data = T;
    type Guard<'a> = std::sync::RwLockWriteGuard<'a, Self::Data> where T: 'a;

    fn new(data: T) -> Self {
        std::sync::RwLock::new(data)
    }

    fn lock(&self) -> Self::Guard<'_> {
        self.write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<T> Shared for std::sync::RwLock<T> {
    type ReadGuard<'a> = std::sync::RwLockReadGuard<'a, Self::Data> where T: 'a;

    fn read(&self) -> Self::ReadGuard<'_> {
        std::sync::RwLock::read(self).unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
