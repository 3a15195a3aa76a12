//! C-compatible status codes.
//!
//! [`MemmanStatus`] is a `repr(i32)` enum: `Ok` is 0 and every error is
//! negative. Values are ABI-stable.

use memman_core::AllocError;

/// Status code returned by every FFI function.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemmanStatus {
    /// Success.
    Ok = 0,
    /// Handle is unknown or its manager was already released.
    InvalidHandle = -1,
    /// The manager is not initialized (never, or since `destroy`).
    NotInitialized = -2,
    /// Zero size, region overflow, unknown placement, or a null out-pointer.
    InvalidArgument = -3,
    /// No free block is large enough for the request.
    OutOfMemory = -4,
    /// The address is not a live allocation.
    InvalidFree = -5,
    /// Internal error (e.g. a poisoned registry after a prior panic, or
    /// handle space exhausted).
    InternalError = -20,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&AllocError> for MemmanStatus {
    fn from(e: &AllocError) -> Self {
        match e {
            AllocError::NotInitialized { .. } => MemmanStatus::NotInitialized,
            AllocError::InvalidArgument { .. } => MemmanStatus::InvalidArgument,
            AllocError::OutOfMemory { .. } => MemmanStatus::OutOfMemory,
            AllocError::InvalidFree { .. } => MemmanStatus::InvalidFree,
        }
    }
}

impl<T> From<Result<T, AllocError>> for MemmanStatus {
    fn from(result: Result<T, AllocError>) -> Self {
        match result {
            Ok(_) => MemmanStatus::Ok,
            Err(e) => MemmanStatus::from(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memman_core::{Address, FreeFault};

    #[test]
    fn codes_are_stable() {
        assert_eq!(MemmanStatus::Ok as i32, 0);
        assert_eq!(MemmanStatus::InvalidHandle as i32, -1);
        assert_eq!(MemmanStatus::NotInitialized as i32, -2);
        assert_eq!(MemmanStatus::InvalidArgument as i32, -3);
        assert_eq!(MemmanStatus::OutOfMemory as i32, -4);
        assert_eq!(MemmanStatus::InvalidFree as i32, -5);
        assert_eq!(MemmanStatus::InternalError as i32, -20);
        assert_eq!(MemmanStatus::Panicked as i32, -128);
    }

    #[test]
    fn every_error_maps() {
        let cases = [
            (
                AllocError::NotInitialized {
                    lifecycle: "destroyed",
                },
                MemmanStatus::NotInitialized,
            ),
            (
                AllocError::invalid_argument("zero"),
                MemmanStatus::InvalidArgument,
            ),
            (
                AllocError::OutOfMemory {
                    requested: 8,
                    largest_free: 4,
                },
                MemmanStatus::OutOfMemory,
            ),
            (
                AllocError::InvalidFree {
                    address: Address(3),
                    fault: FreeFault::UnknownAddress,
                },
                MemmanStatus::InvalidFree,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(MemmanStatus::from(&err), status, "{err}");
        }
    }

    #[test]
    fn results_collapse_to_status() {
        assert_eq!(MemmanStatus::from(Ok::<u8, AllocError>(1)), MemmanStatus::Ok);
        let err: Result<(), AllocError> = Err(AllocError::invalid_argument("x"));
        assert_eq!(MemmanStatus::from(err), MemmanStatus::InvalidArgument);
    }
}
