//! Data models shared by the retrieval and cleaning pipelines.
//!
//! `PaperRecord` is the on-disk shape of one dataset entry; field names are the
//! ones written to and read from the dataset JSON file.

mod corpus;
mod paper;

pub use corpus::Corpus;
pub use paper::PaperRecord;
