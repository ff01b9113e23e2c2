pub mod aggregator;
pub mod database_writer;
pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod processor;
pub mod report;

pub use aggregator::aggregate;
pub use error::{IngestionError, IngestionResult};
pub use normalizer::{FormatError, LocaleTranslator, TimestampFormat, TimestampNormalizer};
pub use pipeline::IngestionPipeline;
pub use processor::{CsvReader, CsvReaderConfig, DataLoader, SourceLocation};
pub use report::{IngestionReport, SkippedRow};
