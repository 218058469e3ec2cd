pub mod analysis;

pub use analysis::{AnalysisError, AnalysisHandler};
