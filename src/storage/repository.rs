// 重新導出子模塊
pub mod check_in;

// 重新導出常用類型
pub use check_in::{replace_rows, CheckInRepository, DEFAULT_BATCH_SIZE};
