use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Missing input table `{table}`: {path} (generate it first)")]
    MissingInput { table: String, path: String },

    #[error("Invalid distribution parameters: {0}")]
    Distribution(String),

    #[error("Generation task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit code used by the binary, so a scheduler can tell bad
    /// input apart from a bad invocation.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::ValidationError(_) | AppError::ConfigError(_) | AppError::Toml(_) => 2,
            AppError::MissingInput { .. } => 3,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_message_names_file() {
        let err = AppError::MissingInput {
            table: "customers".into(),
            path: "data/customers.csv".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("customers"));
        assert!(msg.contains("data/customers.csv"));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_validation_exit_code() {
        assert_eq!(AppError::ValidationError("count".into()).exit_code(), 2);
        assert_eq!(AppError::Task("join".into()).exit_code(), 1);
    }
}
