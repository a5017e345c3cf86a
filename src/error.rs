use std::convert::From;
use std::error;
use std::fmt;

use serde::Serialize;

use crate::calendar::CalendarDate;

/// Why a pick was refused. Recoverable; surfaced to the renderer as a
/// hint, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectionReason {
    OutOfBounds,
    Disabled,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::OutOfBounds => "date outside the configured bounds",
            RejectionReason::Disabled => "date is disabled",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl error::Error for RejectionReason {}

/// Requested day does not exist on the Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl fmt::Display for InvalidDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no such calendar day: {:04}-{:02}-{:02}",
            self.year, self.month, self.day
        )
    }
}

impl error::Error for InvalidDate {}

/// Viewport jump with a month outside 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidViewport {
    pub month: u32,
}

impl fmt::Display for InvalidViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value could not be used as a month: {}", self.month)
    }
}

impl error::Error for InvalidViewport {}

/// Attempt to build a range whose start lies after its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRange {
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl fmt::Display for InvalidRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "range start {} lies after its end {}", self.start, self.end)
    }
}

impl error::Error for InvalidRange {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseErrorKind {
    MalformedText,
    OutOfRangeComponent,
}

impl ParseErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::MalformedText => "text does not match the pattern",
            ParseErrorKind::OutOfRangeComponent => "component out of range",
        }
    }
}

/// Failure to read a date back from text. Leaves the prior selection
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    kind: ParseErrorKind,
    message: Option<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, msg: &str) -> Self {
        ParseError {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

impl From<ParseErrorKind> for ParseError {
    fn from(kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            message: None,
        }
    }
}

impl<E: fmt::Debug> From<nom::Err<E>> for ParseError {
    fn from(error: nom::Err<E>) -> Self {
        ParseError::new(
            ParseErrorKind::MalformedText,
            &format!("error while parsing: {:?}", error),
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind.as_str(), msg),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

impl error::Error for ParseError {}

/// Last surfaced interaction outcome, carried in the snapshot so the
/// renderer can hint at it. Cleared by the next applied command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Notice {
    Rejected(RejectionReason),
    InvalidInput(ParseError),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Rejected(reason) => write!(f, "{}", reason),
            Notice::InvalidInput(err) => write!(f, "{}", err),
        }
    }
}
