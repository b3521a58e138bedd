use thiserror::Error;

/// Errors raised while looking up or constructing a loss.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LossError {
    #[error("unrecognized loss name: {0:?}")]
    UnknownLoss(String),
    #[error("malformed loss parameter list: {0}")]
    MalformedParams(String),
    #[error("duplicate loss parameter `{0}`")]
    DuplicateParam(String),
    #[error("unknown parameter `{param}` for loss `{loss}`")]
    UnknownParam { loss: &'static str, param: String },
    #[error("parameter `{param}` has malformed value `{value}`")]
    MalformedValue { param: &'static str, value: String },
    #[error("parameter `{param}` = {value} is out of range: expected {expected}")]
    OutOfRange {
        param: &'static str,
        value: f64,
        expected: &'static str,
    },
    #[error("loss `{loss}` does not support {output_count} outputs")]
    OutputCount {
        loss: &'static str,
        output_count: usize,
    },
    #[error("out of memory constructing loss")]
    OutOfMemory,
}

pub type LossResult<T> = Result<T, LossError>;

/// Status codes returned across the zone entry points.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    None = 0,
    /// Reserved; construction never reports it today.
    AllocationFailure = -1,
    IllegalParamValue = -2,
    UnrecognizedLossName = -3,
    MalformedLossParameter = -4,
}

impl ErrorKind {
    pub fn is_success(self) -> bool {
        self == ErrorKind::None
    }

    /// Convert from raw i32. Returns None for unknown values.
    pub fn from_i32(v: i32) -> Option<Self> {
        match v {
            0 => Some(Self::None),
            -1 => Some(Self::AllocationFailure),
            -2 => Some(Self::IllegalParamValue),
            -3 => Some(Self::UnrecognizedLossName),
            -4 => Some(Self::MalformedLossParameter),
            _ => None,
        }
    }
}

impl From<&LossError> for ErrorKind {
    fn from(e: &LossError) -> Self {
        match e {
            LossError::UnknownLoss(_) => ErrorKind::UnrecognizedLossName,
            LossError::MalformedParams(_)
            | LossError::DuplicateParam(_)
            | LossError::UnknownParam { .. }
            | LossError::MalformedValue { .. }
            | LossError::OutOfRange { .. } => ErrorKind::MalformedLossParameter,
            LossError::OutputCount { .. } => ErrorKind::IllegalParamValue,
            LossError::OutOfMemory => ErrorKind::AllocationFailure,
        }
    }
}

impl From<LossError> for ErrorKind {
    fn from(e: LossError) -> Self {
        ErrorKind::from(&e)
    }
}
