pub mod classifier;
pub mod policy;

pub use classifier::{classify, Classification, StreamClassifier};
pub use policy::{Disposition, MappedStream, StreamPolicy};
