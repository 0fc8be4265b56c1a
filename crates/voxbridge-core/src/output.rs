//! Binding algorithm output to caller-owned buffers
//!
//! An [`OutputStage`] is the last step of an algorithm: it knows how many
//! elements it will produce and can write them into any slice of that
//! length. [`OutputBinder::bind`] pairs a stage with a destination the
//! caller owns (typically a freshly created host array), checking capacity
//! before anything runs, so the result never needs a second copy.
//!
//! # Examples
//!
//! ```
//! use voxbridge_core::{OutputBinder, OutputStage};
//!
//! struct Ramp(usize);
//!
//! impl OutputStage<u16> for Ramp {
//!     type Error = std::convert::Infallible;
//!
//!     fn expected_len(&self) -> usize {
//!         self.0
//!     }
//!
//!     fn write_into(&mut self, dst: &mut [u16]) -> Result<(), Self::Error> {
//!         for (i, v) in dst.iter_mut().enumerate() {
//!             *v = i as u16;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut buffer = vec![0u16; 8];
//! let written = OutputBinder::bind(Ramp(5), &mut buffer)
//!     .unwrap()
//!     .execute()
//!     .unwrap();
//! assert_eq!(written, 5);
//! assert_eq!(buffer, [0, 1, 2, 3, 4, 0, 0, 0]);
//! ```

use crate::error::{Error, Result};
use crate::kind::Element;

/// Final stage of an algorithm that can write into an external buffer
pub trait OutputStage<T: Element> {
    /// Error raised by the stage while producing output
    type Error;

    /// Number of elements the stage produces
    fn expected_len(&self) -> usize;

    /// Produce the output into `dst`, which is exactly
    /// [`expected_len`](Self::expected_len) elements long.
    fn write_into(&mut self, dst: &mut [T]) -> std::result::Result<(), Self::Error>;
}

impl<T: Element, S: OutputStage<T> + ?Sized> OutputStage<T> for &mut S {
    type Error = S::Error;

    fn expected_len(&self) -> usize {
        (**self).expected_len()
    }

    fn write_into(&mut self, dst: &mut [T]) -> std::result::Result<(), Self::Error> {
        (**self).write_into(dst)
    }
}

/// Binds output stages to caller-owned destinations
pub struct OutputBinder;

impl OutputBinder {
    /// Bind `stage` to write into `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityTooSmall`] if `dst` is shorter than the
    /// stage's expected output.
    pub fn bind<T: Element, S: OutputStage<T>>(
        stage: S,
        dst: &mut [T],
    ) -> Result<BoundOutput<'_, T, S>> {
        let expected = stage.expected_len();
        if expected > dst.len() {
            return Err(Error::CapacityTooSmall {
                expected,
                capacity: dst.len(),
            });
        }
        Ok(BoundOutput { stage, dst })
    }
}

/// A stage bound to its destination, ready to run
pub struct BoundOutput<'a, T: Element, S: OutputStage<T>> {
    stage: S,
    dst: &'a mut [T],
}

impl<T: Element, S: OutputStage<T>> BoundOutput<'_, T, S> {
    /// Capacity of the bound destination
    pub fn capacity(&self) -> usize {
        self.dst.len()
    }

    /// Number of elements the stage will write
    pub fn expected_len(&self) -> usize {
        self.stage.expected_len()
    }

    /// Run the stage over `dst[..expected_len]` and return the number of
    /// elements written. Elements past that prefix are left untouched.
    pub fn execute(mut self) -> std::result::Result<usize, S::Error> {
        let n = self.stage.expected_len().min(self.dst.len());
        self.stage.write_into(&mut self.dst[..n])?;
        Ok(n)
    }
}
