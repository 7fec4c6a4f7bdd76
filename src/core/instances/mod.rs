mod dense_instance;
mod instance;
mod sparse_instance;

pub use dense_instance::DenseInstance;
pub use instance::{Instance, MISSING_VALUE};
pub use sparse_instance::SparseInstance;
