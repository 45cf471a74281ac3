//! Parse diagnostics: categorized error codes and the error type itself.

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::SyntaxError;

#[cfg(test)]
mod tests;
