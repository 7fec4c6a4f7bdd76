pub mod majority_class;

pub use majority_class::MajorityClass;
