//! Bookshelf Library Management
//!
//! The [`Library`] collection: adding and removing books, exact-match
//! queries, and the loan/return workflow with late fees.
//!
//! Loan state lives on each [`Book`](bookshelf_core::Book). A
//! [`User`](bookshelf_core::User)'s borrowed list is a separate record that
//! the library reads but never updates.

pub mod error;
pub mod manager;
pub mod policy;

pub use error::{LibraryError, LibraryResult};
pub use manager::{Library, LibraryStats};
pub use policy::LoanPolicy;
