pub mod writer;

pub use writer::write_dataset_to_xlsx;
