pub mod fields;
pub mod normalizer;
pub mod record;
pub mod shape;

pub use normalizer::{NormalizeOutcome, Normalizer};
pub use record::CanonicalRecord;
pub use shape::SourceShape;
