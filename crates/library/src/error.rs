use thiserror::Error;

/// Why a loan, return, or library setup failed
///
/// The plain `loan_book`/`return_book` operations collapse these to `false`;
/// the `try_` forms keep the reason.
#[derive(Error, Debug, PartialEq)]
pub enum LibraryError {
    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Every copy of '{0}' is already on loan")]
    NoCopyAvailable(String),

    #[error("No copy of '{0}' is on loan")]
    NotOnLoan(String),

    #[error("Invalid loan policy: {0}")]
    InvalidPolicy(String),
}

pub type LibraryResult<T> = std::result::Result<T, LibraryError>;
