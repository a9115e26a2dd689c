// Copyright (c) the NCP contributors.
// Licensed under the MIT License.

//! Cursor-tracked input views
//!
//! [`ByteView`] models an input buffer with a position cursor and a limit.
//! Streaming operations consume the span between the two and advance the
//! cursor to the limit, which lets callers refill and reuse one buffer across
//! updates. Three backings are supported: raw memory, a borrowed slice, and
//! caller-defined storage behind [`OpaqueBytes`].

/// Caller-defined byte storage that cannot hand out a contiguous slice.
pub trait OpaqueBytes {
    /// Total readable length in bytes.
    fn len(&self) -> usize;

    /// Whether the storage is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies `dst.len()` bytes starting at `offset` into `dst`.
    fn copy_into(&self, offset: usize, dst: &mut [u8]);
}

#[derive(Clone, Copy)]
pub(crate) enum Backing<'a> {
    /// Raw memory; consumed without copying.
    Direct { ptr: *const u8, len: usize },
    /// Borrowed slice; consumed without copying.
    Array(&'a [u8]),
    /// Caller storage; consumed through a scratch copy.
    Opaque(&'a dyn OpaqueBytes),
}

/// A readable window over bytes, with `position` and `limit` cursors.
///
/// Only the span `position..limit` is visible to consumers. After a streaming
/// update the view's position equals its limit.
pub struct ByteView<'a> {
    backing: Backing<'a>,
    position: usize,
    limit: usize,
}

impl<'a> ByteView<'a> {
    /// A view over a slice, initially spanning all of it.
    pub fn array(data: &'a [u8]) -> Self {
        let limit = data.len();
        Self {
            backing: Backing::Array(data),
            position: 0,
            limit,
        }
    }

    /// A view over raw memory, initially spanning all `len` bytes.
    ///
    /// # Safety
    /// `ptr` must be valid for reads of `len` bytes for the view's lifetime,
    /// and the memory must not be mutated while the view exists.
    pub unsafe fn direct(ptr: *const u8, len: usize) -> Self {
        Self {
            backing: Backing::Direct { ptr, len },
            position: 0,
            limit: len,
        }
    }

    /// A view over caller-defined storage, initially spanning all of it.
    pub fn opaque(bytes: &'a dyn OpaqueBytes) -> Self {
        let limit = bytes.len();
        Self {
            backing: Backing::Opaque(bytes),
            position: 0,
            limit,
        }
    }

    /// Total capacity of the underlying storage.
    pub fn capacity(&self) -> usize {
        match &self.backing {
            Backing::Direct { len, .. } => *len,
            Backing::Array(data) => data.len(),
            Backing::Opaque(bytes) => bytes.len(),
        }
    }

    /// Current read position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes left between position and limit.
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Whether any bytes are left to consume.
    pub fn has_remaining(&self) -> bool {
        self.position < self.limit
    }

    /// Moves the read position.
    ///
    /// # Panics
    /// Panics if `position` exceeds the current limit.
    pub fn set_position(&mut self, position: usize) {
        assert!(
            position <= self.limit,
            "position {position} exceeds limit {}",
            self.limit
        );
        self.position = position;
    }

    /// Moves the limit. A position beyond the new limit is pulled back to it.
    ///
    /// # Panics
    /// Panics if `limit` exceeds the capacity.
    pub fn set_limit(&mut self, limit: usize) {
        assert!(
            limit <= self.capacity(),
            "limit {limit} exceeds capacity {}",
            self.capacity()
        );
        self.limit = limit;
        if self.position > limit {
            self.position = limit;
        }
    }

    pub(crate) fn backing(&self) -> Backing<'a> {
        self.backing
    }

    /// Marks the whole visible span as consumed.
    pub(crate) fn advance_to_limit(&mut self) {
        self.position = self.limit;
    }

    /// Copies out the visible span and marks it consumed.
    pub(crate) fn take_remaining(&mut self) -> Vec<u8> {
        let len = self.remaining();
        let mut out = vec![0u8; len];
        match &self.backing {
            Backing::Direct { ptr, .. } => {
                // Validity for position..limit is guaranteed by the `direct`
                // constructor's safety contract.
                let src = unsafe { std::slice::from_raw_parts(ptr.add(self.position), len) };
                out.copy_from_slice(src);
            }
            Backing::Array(data) => {
                out.copy_from_slice(&data[self.position..self.limit]);
            }
            Backing::Opaque(bytes) => {
                bytes.copy_into(self.position, &mut out);
            }
        }
        self.advance_to_limit();
        out
    }
}
