//! Decimal-precision engine for a gold-loan business: flat-interest loan
//! previews, EMI schedules, payment recording, submission validation, and
//! pledge valuation. No I/O and no persistence; callers own both.

pub mod error;
pub mod gold;
pub mod interest;
pub mod payment;
pub mod schedule;
pub mod types;
pub mod validate;

pub use error::BankerSyncError;
pub use types::*;

/// Standard result type for all banker-sync operations
pub type BankerSyncResult<T> = Result<T, BankerSyncError>;
