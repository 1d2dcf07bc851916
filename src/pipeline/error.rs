use thiserror::Error;

/// Terminal failure of an analysis run. No partial report accompanies it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// The input archive or source root could not be used
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis failed during {stage}: {message}")]
    StageFailed { stage: String, message: String },
}

impl AnalysisError {
    /// Name of the stage that failed. Input errors belong to the extraction stage.
    pub fn stage(&self) -> &str {
        match self {
            AnalysisError::InvalidInput(_) => "ExtractPhase",
            AnalysisError::StageFailed { stage, .. } => stage,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AnalysisError::InvalidInput(message) => message,
            AnalysisError::StageFailed { message, .. } => message,
        }
    }

    pub fn is_input_error(&self) -> bool {
        matches!(self, AnalysisError::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_failed_display_keeps_message() {
        let err = AnalysisError::StageFailed {
            stage: "RetrievePhase".to_string(),
            message: "boom: connection reset".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Analysis failed during RetrievePhase: boom: connection reset"
        );
        assert_eq!(err.stage(), "RetrievePhase");
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_input_error_belongs_to_extraction() {
        let err = AnalysisError::InvalidInput("missing.tar.gz not found".to_string());
        assert_eq!(err.stage(), "ExtractPhase");
        assert!(err.is_input_error());
    }
}
