use crate::domain::model::{CustomerRecord, RecordBatch};
use crate::utils::error::Result;

/// The opaque trained model. Takes whole records; any encoding of
/// categorical values into numeric features happens behind this trait.
/// Returns one 0/1 raw label per record, positionally aligned.
pub trait Classifier {
    fn predict(&self, records: &[CustomerRecord]) -> Result<Vec<u8>>;
}

/// File access seam so pipeline code never touches the filesystem directly.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

/// One of the three collection modes. Each produces a complete batch or
/// fails; no partial batch is ever emitted.
pub trait InputSource {
    fn collect(&mut self) -> Result<RecordBatch>;
}
