//! polarize-finance: deal distribution, currency normalization, aggregation and export

pub mod batch;
pub mod currency;
pub mod distribution;
pub mod export;
pub mod session;
pub mod summary;

pub use batch::{BatchReport, Document, analyze_batch};
pub use currency::{Conversion, CurrencyNormalizer};
pub use distribution::{Distribution, Split, distribute, distribute_all};
pub use export::{to_csv_string, write_csv, write_csv_file};
pub use session::{SessionPayload, SessionReceipt};
pub use summary::summarize;
