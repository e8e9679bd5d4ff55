use thiserror::Error;

/// Typed failure of the analysis pipeline.
///
/// Detector and classifier faults are converted into these variants at
/// the use-case boundary instead of leaking trait-object errors to the
/// caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("face detection failed: {0}")]
    Detection(String),
    #[error("emotion classification failed: {0}")]
    Classification(String),
}
