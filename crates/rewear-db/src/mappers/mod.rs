//! Model to entity mappers
//!
//! Rows are converted into domain entities here. Enum columns are parsed
//! back into their value objects; a value the domain does not know means the
//! row is corrupt and surfaces as a database error.

mod admin_log;
mod item;
mod points_transaction;
mod session;
mod swap_request;
mod user;

use rewear_core::DomainError;

/// Wrap a parse failure of a stored column
fn corrupt_row(table: &str, err: DomainError) -> DomainError {
    DomainError::DatabaseError(format!("invalid {table} row: {err}"))
}
