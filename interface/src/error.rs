use crate::schema::IntWidth;

/// Failures raised by the codec while encoding or decoding account data.
///
/// Every failure is surfaced to the caller as a value; nothing is defaulted
/// or truncated inside the codec.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CodecError {
    /// Strict decoding consumed a different number of bytes than the input
    /// holds, or the input ended in the middle of a fixed-width field.
    LengthMismatch { expected: usize, actual: usize },
    /// The input ended in the middle of a (key, value) pair, or a key was
    /// not valid UTF-8.
    MalformedContainer,
    /// A value does not fit in the wire width its schema field declares.
    WidthOverflow {
        field: &'static str,
        value: u64,
        width: IntWidth,
    },
    /// The count field framing an associative container disagrees with the
    /// container's actual entry count.
    ContainerCountMismatch { declared: u64, actual: usize },
    /// The logical encoding does not fit in the allocated buffer space.
    CapacityExceeded { space: usize, required: usize },
}

impl From<&CodecError> for &'static str {
    fn from(value: &CodecError) -> Self {
        match value {
            CodecError::LengthMismatch { .. } => "Byte length doesn't match the schema",
            CodecError::MalformedContainer => "Truncated or invalid container entry",
            CodecError::WidthOverflow { .. } => "Value exceeds its declared wire width",
            CodecError::ContainerCountMismatch { .. } => {
                "Count field doesn't match the container's entry count"
            }
            CodecError::CapacityExceeded { .. } => "Encoded data exceeds the allocated space",
        }
    }
}

impl core::fmt::Display for CodecError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg: &'static str = self.into();
        match self {
            CodecError::LengthMismatch { expected, actual } => {
                write!(f, "{msg} (expected {expected} bytes, got {actual})")
            }
            CodecError::MalformedContainer => write!(f, "{msg}"),
            CodecError::WidthOverflow {
                field,
                value,
                width,
            } => {
                write!(f, "{msg} ({field} = {value} > {} bytes)", width.byte_len())
            }
            CodecError::ContainerCountMismatch { declared, actual } => {
                write!(f, "{msg} (declared {declared}, found {actual})")
            }
            CodecError::CapacityExceeded { space, required } => {
                write!(f, "{msg} ({required} bytes into {space})")
            }
        }
    }
}

impl std::error::Error for CodecError {}

pub type CodecResult<T> = Result<T, CodecError>;
