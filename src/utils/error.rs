use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrudError {
    #[error("NOT NULL constraint failed: {table}.{column}")]
    NotNullViolation { table: String, column: String },

    #[error("UNIQUE constraint failed: {table}.{column} = '{value}'")]
    UniqueViolation {
        table: String,
        column: String,
        value: String,
    },

    #[error("FOREIGN KEY constraint failed: {table} {id} is still referenced by {referenced_by}")]
    ForeignKeyViolation {
        table: String,
        id: i64,
        referenced_by: String,
    },

    #[error("{entity} must be saved before it can be referenced")]
    UnsavedReference { entity: String },

    #[error("id sequence exhausted while inserting into {table}")]
    SequenceExhausted { table: String },

    #[error("{entity} {id} Not Found")]
    NotFound { entity: String, id: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Constraint,
    NotFound,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CrudError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        CrudError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CrudError::NotNullViolation { .. }
            | CrudError::UniqueViolation { .. }
            | CrudError::ForeignKeyViolation { .. }
            | CrudError::UnsavedReference { .. } => ErrorCategory::Constraint,
            CrudError::NotFound { .. } => ErrorCategory::NotFound,
            CrudError::SequenceExhausted { .. }
            | CrudError::IoError(_)
            | CrudError::SerializationError(_) => ErrorCategory::Storage,
            CrudError::ConfigValidationError { .. } | CrudError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Constraint => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CrudError::NotNullViolation { .. } => "Provide a value for the required column",
            CrudError::UniqueViolation { .. } => "Choose a value that is not already in use",
            CrudError::ForeignKeyViolation { .. } => {
                "Remove the record from every restaurant that uses it first"
            }
            CrudError::UnsavedReference { .. } => "Save the referenced record first and reuse its id",
            CrudError::SequenceExhausted { .. } => {
                "Explicit ids near the integer limit block new inserts; renumber the seeded rows"
            }
            CrudError::NotFound { .. } => "Check the id; list the existing records to find it",
            CrudError::IoError(_) => "Check that the data directory exists and is writable",
            CrudError::SerializationError(_) => {
                "The snapshot file may be corrupt; move it aside and reseed"
            }
            CrudError::ConfigValidationError { .. } | CrudError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and retry"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Constraint => format!("The change was rejected: {}", self),
            ErrorCategory::NotFound => self.to_string(),
            ErrorCategory::Storage => format!("Could not read or write stored data: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CrudError>;
