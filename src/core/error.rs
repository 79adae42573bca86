use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationMissingArgument,
    ValidationInvalidArgument,

    ProfileInvalid,
    ProfileMissingField,

    LayoutInvalid,

    DocumentNotFound,
    DocumentInvalidJson,
    DocumentInvalidShape,

    RewriteInvalidPattern,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationMissingArgument => "validation.missing_argument",
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::ProfileInvalid => "profile.invalid",
            ErrorCode::ProfileMissingField => "profile.missing_field",

            ErrorCode::LayoutInvalid => "layout.invalid",

            ErrorCode::DocumentNotFound => "document.not_found",
            ErrorCode::DocumentInvalidJson => "document.invalid_json",
            ErrorCode::DocumentInvalidShape => "document.invalid_shape",

            ErrorCode::RewriteInvalidPattern => "rewrite.invalid_pattern",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingArgumentDetails {
    pub args: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseErrorDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingFieldDetails {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentShapeDetails {
    pub path: String,
    pub expected: String,
    pub found: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidPatternDetails {
    pub pattern: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn validation_missing_argument(args: Vec<String>) -> Self {
        Self::new(
            ErrorCode::ValidationMissingArgument,
            "Missing required argument",
            to_details(MissingArgumentDetails { args }),
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            to_details(InvalidArgumentDetails {
                field: field.into(),
                problem: problem.into(),
                value,
            }),
        )
    }

    pub fn profile_invalid(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ProfileInvalid,
            "Brand profile could not be parsed",
            to_details(ParseErrorDetails {
                path: path.into(),
                error: error.into(),
            }),
        )
        .with_hint("Run 'whitelabel create <brand-name>' to generate a valid profile")
    }

    pub fn profile_missing_field(field: impl Into<String>, path: Option<String>) -> Self {
        let field = field.into();
        Self::new(
            ErrorCode::ProfileMissingField,
            format!("Brand profile is missing required field '{}'", field),
            to_details(MissingFieldDetails { field, path }),
        )
    }

    pub fn layout_invalid(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::LayoutInvalid,
            "Target layout could not be parsed",
            to_details(ParseErrorDetails {
                path: path.into(),
                error: error.into(),
            }),
        )
    }

    pub fn document_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::DocumentNotFound,
            format!("Target document not found: {}", path),
            to_details(MissingFieldDetails {
                field: "path".to_string(),
                path: Some(path),
            }),
        )
        .with_hint("Pass --root to point at the project tree, or adjust the layout file")
    }

    pub fn document_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::DocumentInvalidJson,
            "Invalid JSON in target document",
            to_details(ParseErrorDetails {
                path: path.into(),
                error: err.to_string(),
            }),
        )
    }

    pub fn document_invalid_shape(path: impl Into<String>, found: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::DocumentInvalidShape,
            "Target document must be a JSON object",
            to_details(DocumentShapeDetails {
                path: path.into(),
                expected: "object".to_string(),
                found: found.into(),
            }),
        )
    }

    pub fn rewrite_invalid_pattern(pattern: impl Into<String>, err: regex::Error) -> Self {
        Self::new(
            ErrorCode::RewriteInvalidPattern,
            "Invalid replacement pattern",
            to_details(InvalidPatternDetails {
                pattern: pattern.into(),
                error: err.to_string(),
            }),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalIoError,
            "IO error",
            to_details(InternalErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalJsonError,
            "JSON error",
            to_details(InternalErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
