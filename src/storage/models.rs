pub mod check_in;

pub use check_in::{CheckInRow, CHECK_IN_TABLE};
