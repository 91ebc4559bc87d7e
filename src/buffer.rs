use crate::error::AllocFailure;
use allocator_api2::alloc::{Allocator, Global};
use std::{fmt, ops};

/// An owned, contiguous sequence of code units produced by a pipeline.
pub type Units<T, A = Global> = allocator_api2::vec::Vec<T, A>;

/// A growable output sequence whose memory comes only from the injected
/// strategy `A`.
///
/// Every growth is a fallible reservation; a refused reservation is reported
/// as [`AllocFailure`] and nothing is retried.
pub struct Buffer<T, A: Allocator = Global>(Units<T, A>);

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Buffer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Buffer(")?;
        f.debug_list().entries(self.0.iter()).finish()?;
        write!(f, ")")
    }
}

impl<T, A: Allocator> ops::Deref for Buffer<T, A> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl<T, A: Allocator> Buffer<T, A> {
    /// Creates a buffer with room for `hint` elements, acquired from `alloc`.
    pub fn with_hint_in(hint: usize, alloc: A) -> Result<Self, AllocFailure> {
        let mut buffer = Buffer(Units::new_in(alloc));
        buffer.reserve(hint)?;
        Ok(buffer)
    }

    /// Makes sure `additional` more elements fit without another acquisition.
    pub fn reserve(&mut self, additional: usize) -> Result<(), AllocFailure> {
        self.0.try_reserve(additional).map_err(|_| {
            log::warn!(
                "memory strategy refused {} more elements (len {})",
                additional,
                self.0.len()
            );
            AllocFailure {
                requested: additional,
            }
        })
    }

    /// Appends one element.
    #[inline]
    pub fn push(&mut self, item: T) -> Result<(), AllocFailure> {
        if self.0.len() == self.0.capacity() {
            self.reserve(1)?;
        }
        self.0.push(item);
        Ok(())
    }

    /// Appends every element yielded by `iter`.
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), AllocFailure> {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0)?;
        for item in iter {
            self.push(item)?;
        }
        Ok(())
    }

    /// The elements written so far.
    pub fn as_slice(&self) -> &[T] {
        self.0.as_slice()
    }

    /// The elements written so far; mutable version.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.0.as_mut_slice()
    }

    /// Drops everything past the first `len` elements. Storage is kept.
    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    /// Gives up the buffer and returns its contents.
    pub fn into_units(self) -> Units<T, A> {
        self.0
    }
}

impl<T: Copy, A: Allocator> Buffer<T, A> {
    /// Appends every element of `items`.
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), AllocFailure> {
        self.reserve(items.len())?;
        self.0.extend_from_slice(items);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_alloc {
    use allocator_api2::alloc::{AllocError, Allocator, Global};
    use std::{alloc::Layout, cell::Cell, ptr::NonNull};

    /// Forwards to `Global` while counting acquisitions and releases.
    #[derive(Debug, Default)]
    pub(crate) struct CountingAlloc {
        pub(crate) acquired: Cell<usize>,
        pub(crate) released: Cell<usize>,
    }

    unsafe impl Allocator for CountingAlloc {
        fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
            self.acquired.set(self.acquired.get() + 1);
            Global.allocate(layout)
        }

        unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
            self.released.set(self.released.get() + 1);
            unsafe { Global.deallocate(ptr, layout) }
        }
    }

    /// Hands out at most `budget` bytes per allocation.
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct CappedAlloc {
        pub(crate) budget: usize,
    }

    unsafe impl Allocator for CappedAlloc {
        fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
            if layout.size() > self.budget {
                return Err(AllocError);
            }
            Global.allocate(layout)
        }

        unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
            unsafe { Global.deallocate(ptr, layout) }
        }
    }
}
