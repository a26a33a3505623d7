pub mod fingerprint;
pub mod persona;
pub mod pipeline;
pub mod result;
pub mod validate;

pub use fingerprint::content_fingerprint;
pub use pipeline::{EvaluationPipeline, PromptSubmission};
pub use result::{EvaluationError, EvaluationResult, FrameworkFit, StructuralScores};
