//! Bookshelf core domain
//!
//! Plain records shared by every other crate in the workspace:
//! - `Book` and its `BookId` handle
//! - `User` with the list of handles it has checked out
//! - `Clock`, the single source of "today" for loan bookkeeping

pub mod clock;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use chrono::NaiveDate;
pub use clock::{parse_date, Clock, FixedClock, SystemClock};
pub use error::{CoreError, Result};
pub use types::{Book, BookId, User};
