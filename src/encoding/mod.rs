//! Categorical encoding of the calendar month into a numeric design matrix.

mod month;

pub use month::{response_vector, DesignMatrix, MonthEncoding, INTERCEPT_NAME};
