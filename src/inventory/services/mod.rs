/// Pure domain services operating on inventories
pub mod comparator;
pub mod metadata_generator;

pub use comparator::{Comparator, ComparisonReport, Discrepancy};
pub use metadata_generator::MetadataGenerator;
