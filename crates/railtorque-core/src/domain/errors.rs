use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AlignResult<T> = Result<T, AlignError>;

pub const MISSING_POSITION_DATA: &str = "INPUT.MISSING_POSITION_DATA";
pub const MISSING_OFFSET_DATA: &str = "INPUT.MISSING_OFFSET_DATA";
pub const CONFIGURATION_PARSE: &str = "INPUT.CONFIGURATION_PARSE";
pub const SEQUENCE_LENGTH_MISMATCH: &str = "INPUT.SEQUENCE_LENGTH_MISMATCH";
pub const EMPTY_SERIES: &str = "INPUT.EMPTY_SERIES";
pub const NUMBER_OUT_OF_RANGE: &str = "INPUT.NUMBER_OUT_OF_RANGE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignErrorCategory {
    InputValidationError,
    IoSystemError,
    InternalError,
}

impl AlignErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::InternalError => "InternalError",
        }
    }
}

/// Request-fatal failure raised anywhere between decoding and rendering.
///
/// `code` is a stable dotted identifier (`INPUT.MISSING_OFFSET_DATA`, ...) that
/// tests and callers match on; `message` is the single line shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignError {
    category: AlignErrorCategory,
    code: &'static str,
    message: String,
}

impl AlignError {
    pub fn new(category: AlignErrorCategory, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    pub fn input_validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(AlignErrorCategory::InputValidationError, code, message)
    }

    pub fn io_system(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(AlignErrorCategory::IoSystemError, code, message)
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(AlignErrorCategory::InternalError, code, message)
    }

    pub fn missing_position_data(message: impl Into<String>) -> Self {
        Self::input_validation(MISSING_POSITION_DATA, message)
    }

    pub fn missing_offset_data(message: impl Into<String>) -> Self {
        Self::input_validation(MISSING_OFFSET_DATA, message)
    }

    pub fn configuration_parse(message: impl Into<String>) -> Self {
        Self::input_validation(CONFIGURATION_PARSE, message)
    }

    pub const fn category(&self) -> AlignErrorCategory {
        self.category
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.code, self.message)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}

impl Display for AlignError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.code,
            self.message
        )
    }
}

impl Error for AlignError {}
