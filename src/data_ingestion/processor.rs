pub mod csv_io;
pub mod data_loader;

pub use csv_io::{CsvReader, CsvReaderConfig};
pub use data_loader::{DataLoader, SourceLocation, DEFAULT_SOURCE_FILE};
