//! The capability every pooled resource provides.

use std::fmt;

/// A resource that holds something which must be released explicitly.
///
/// `close` consumes the resource, so a closed value cannot be handed out
/// again. The pool calls it exactly once for every resource it decides to
/// discard.
pub trait Closeable: Send + 'static {
    /// Error reported when closing fails
    type Error: fmt::Display;

    /// Release the underlying system resources
    fn close(self) -> Result<(), Self::Error>;
}

impl<T: Closeable> Closeable for Box<T> {
    type Error = T::Error;

    fn close(self) -> Result<(), Self::Error> {
        (*self).close()
    }
}
