// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Lock-guarded array handle for use across threads.
//!
//! [`NdArray`] itself has no interior mutability; concurrent writers go
//! through a [`SharedArray`], which wraps one array in an `Arc<RwLock<_>>`.
//! Readers run in parallel, writers are exclusive, and every operation holds
//! the lock for exactly one call.

use crate::{Element, NdArray, NdError, Shape};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A cloneable handle to one array shared between threads.
///
/// Clones refer to the same array.
///
/// # Examples
/// ```
/// use nd_core::{NdArray, Shape, SharedArray};
///
/// let shared = SharedArray::new(NdArray::<u32>::zeros(Shape::vector(4).unwrap()).unwrap());
/// let handles: Vec<_> = (0..4isize)
///     .map(|i| {
///         let s = shared.clone();
///         std::thread::spawn(move || s.set(&[i], i as u32 * 10).unwrap())
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert_eq!(shared.snapshot().unwrap().as_slice(), &[0, 10, 20, 30]);
/// ```
#[derive(Debug)]
pub struct SharedArray<T: Element> {
    inner: Arc<RwLock<NdArray<T>>>,
}

impl<T: Element> Clone for SharedArray<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Element> SharedArray<T> {
    /// Takes ownership of `array` and makes it shareable.
    pub fn new(array: NdArray<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(array)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, NdArray<T>>, NdError> {
        self.inner.read().map_err(|_| NdError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, NdArray<T>>, NdError> {
        self.inner.write().map_err(|_| NdError::LockPoisoned)
    }

    pub fn get(&self, coordinate: &[isize]) -> Result<T, NdError> {
        self.read()?.get(coordinate)
    }

    pub fn set(&self, coordinate: &[isize], value: T) -> Result<(), NdError> {
        self.write()?.set(coordinate, value)
    }

    pub fn shape(&self) -> Result<Shape, NdError> {
        Ok(self.read()?.shape().clone())
    }

    /// Replaces the shape under the write lock. See [`NdArray::resize`].
    pub fn resize(&self, shape: Shape) -> Result<(), NdError> {
        self.write()?.resize(shape)
    }

    /// Returns a copy of the array as it is right now.
    pub fn snapshot(&self) -> Result<NdArray<T>, NdError> {
        Ok(self.read()?.clone())
    }

    /// Runs `f` with shared access to the array.
    pub fn with_read<R>(&self, f: impl FnOnce(&NdArray<T>) -> R) -> Result<R, NdError> {
        Ok(f(&*self.read()?))
    }

    /// Runs `f` with exclusive access; no other reader or writer interleaves.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut NdArray<T>) -> R) -> Result<R, NdError> {
        Ok(f(&mut *self.write()?))
    }

    /// Takes the array out if this is the last handle.
    ///
    /// Returns `Ok(None)` and drops this handle while other clones are alive.
    /// A poisoned lock fails with [`NdError::LockPoisoned`]; the array it
    /// guarded is discarded.
    pub fn into_inner(self) -> Result<Option<NdArray<T>>, NdError> {
        match Arc::into_inner(self.inner) {
            Some(lock) => lock.into_inner().map(Some).map_err(|_| NdError::LockPoisoned),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn shared_zeros(len: usize) -> SharedArray<i32> {
        SharedArray::new(NdArray::zeros(Shape::vector(len).unwrap()).unwrap())
    }

    #[test]
    fn test_clones_share_storage() {
        let a = shared_zeros(2);
        let b = a.clone();
        b.set(&[1], 7).unwrap();
        assert_eq!(a.get(&[1]).unwrap(), 7);
    }

    #[test]
    fn test_concurrent_increments() {
        let a = shared_zeros(1);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let a = a.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        a.with_write(|arr| *arr.get_mut(&[0]).unwrap() += 1).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(a.get(&[0]).unwrap(), 800);
    }

    #[test]
    fn test_resize_visible_to_all_handles() {
        let a = shared_zeros(4);
        let b = a.clone();
        a.resize(Shape::matrix(2, 3).unwrap()).unwrap();
        assert_eq!(b.shape().unwrap().dims(), &[2, 3]);
        assert_eq!(b.with_read(|arr| arr.size()).unwrap(), 6);
    }

    #[test]
    fn test_errors_pass_through() {
        let a = shared_zeros(2);
        assert!(a.get(&[2]).unwrap_err().is_out_of_bounds());
        assert!(a.set(&[-1], 0).is_err());
    }

    #[test]
    fn test_poisoned_lock() {
        let a = shared_zeros(1);
        let b = a.clone();
        let _ = thread::spawn(move || {
            b.with_write(|_| panic!("writer panicked")).unwrap();
        })
        .join();
        assert_eq!(a.get(&[0]).unwrap_err(), NdError::LockPoisoned);
    }

    #[test]
    fn test_into_inner_last_handle() {
        let a = shared_zeros(3);
        let b = a.clone();
        b.set(&[2], 5).unwrap();
        assert_eq!(a.into_inner().unwrap(), None);
        let array = b.into_inner().unwrap().unwrap();
        assert_eq!(array.as_slice(), &[0, 0, 5]);
    }

    #[test]
    fn test_into_inner_keeps_poison() {
        let a = shared_zeros(1);
        let b = a.clone();
        let _ = thread::spawn(move || {
            b.with_write(|arr| {
                arr.set(&[0], 9).unwrap();
                panic!("writer panicked");
            })
            .unwrap();
        })
        .join();
        assert_eq!(a.get(&[0]).unwrap_err(), NdError::LockPoisoned);
        assert_eq!(a.into_inner().unwrap_err(), NdError::LockPoisoned);
    }

    #[test]
    fn test_with_read_and_write_borrow_through_guard() {
        let a = shared_zeros(2);
        a.with_write(|arr| arr.fill(4)).unwrap();
        assert_eq!(a.with_read(|arr| arr.as_slice().to_vec()).unwrap(), vec![4, 4]);
    }
}
