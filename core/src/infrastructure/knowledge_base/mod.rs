pub mod json_dataset;

pub use json_dataset::{AssembledDataset, JsonDatasetSource, assemble, write_dataset};
