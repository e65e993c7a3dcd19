//! Error types for the containers.
//!
//! Only two failure kinds are recoverable: out-of-range access and requests
//! that exceed a container's `max_size`. A missing key is never an error:
//! lookups return `None`/`end()` and `erase` returns a zero count.

/// Represents an access outside the live elements of a container.
///
/// Returned by bounds-checked access (`at`), by `pop_back` on an empty
/// array, by `Stack::pop` on an empty stack and by `OrderedMap::at` on an
/// absent key.
///
/// # Examples
///
/// ```rust
/// use rbcollections::error::OutOfRangeError;
///
/// let error = OutOfRangeError {
///     operation: "DynamicArray::at",
///     index: Some(7),
///     length: 3,
/// };
/// assert_eq!(
///     format!("{error}"),
///     "DynamicArray::at: index (which is 7) >= len (which is 3)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOfRangeError {
    /// The operation that rejected the access.
    pub operation: &'static str,
    /// The requested index, or `None` when no element exists at all.
    pub index: Option<usize>,
    /// The number of live elements at the time of the call.
    pub length: usize,
}

impl OutOfRangeError {
    pub(crate) const fn index(operation: &'static str, index: usize, length: usize) -> Self {
        Self {
            operation,
            index: Some(index),
            length,
        }
    }

    pub(crate) const fn missing(operation: &'static str, length: usize) -> Self {
        Self {
            operation,
            index: None,
            length,
        }
    }
}

impl std::fmt::Display for OutOfRangeError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.index {
            Some(index) => write!(
                formatter,
                "{}: index (which is {}) >= len (which is {})",
                self.operation, index, self.length
            ),
            None => write!(
                formatter,
                "{}: no such element (len is {})",
                self.operation, self.length
            ),
        }
    }
}

impl std::error::Error for OutOfRangeError {}

/// Represents a request for more elements than a container can hold.
///
/// The check happens before any allocation, so the container is left
/// exactly as it was.
///
/// # Examples
///
/// ```rust
/// use rbcollections::error::LengthError;
///
/// let error = LengthError {
///     operation: "DynamicArray::reserve",
///     requested: 100,
///     max_size: 10,
/// };
/// assert_eq!(
///     format!("{error}"),
///     "DynamicArray::reserve: requested length 100 exceeds max_size 10"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthError {
    /// The operation that rejected the request.
    pub operation: &'static str,
    /// The element count that was asked for.
    pub requested: usize,
    /// The largest element count the container supports.
    pub max_size: usize,
}

impl std::fmt::Display for LengthError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}: requested length {} exceeds max_size {}",
            self.operation, self.requested, self.max_size
        )
    }
}

impl std::error::Error for LengthError {}

/// Unified error type for all container operations.
///
/// Lets callers mix array, stack and map calls under one `?`.
///
/// # Examples
///
/// ```rust
/// use rbcollections::array::DynamicArray;
/// use rbcollections::error::ContainerError;
///
/// fn second_then_grow(array: &mut DynamicArray<i32>) -> Result<i32, ContainerError> {
///     let second = *array.at(1)?;
///     array.reserve(64)?;
///     Ok(second)
/// }
///
/// let mut array: DynamicArray<i32> = [1, 2, 3].into_iter().collect();
/// assert_eq!(second_then_grow(&mut array), Ok(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// An access outside the live elements.
    OutOfRange(OutOfRangeError),
    /// A request beyond the container's `max_size`.
    Length(LengthError),
}

impl std::fmt::Display for ContainerError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange(error) => write!(formatter, "{error}"),
            Self::Length(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for ContainerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OutOfRange(error) => Some(error),
            Self::Length(error) => Some(error),
        }
    }
}

impl From<OutOfRangeError> for ContainerError {
    fn from(error: OutOfRangeError) -> Self {
        Self::OutOfRange(error)
    }
}

impl From<LengthError> for ContainerError {
    fn from(error: LengthError) -> Self {
        Self::Length(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::error::Error;

    #[rstest]
    fn test_out_of_range_index_display() {
        let error = OutOfRangeError::index("DynamicArray::at", 5, 5);
        assert_eq!(
            format!("{error}"),
            "DynamicArray::at: index (which is 5) >= len (which is 5)"
        );
    }

    #[rstest]
    fn test_out_of_range_missing_display() {
        let error = OutOfRangeError::missing("DynamicArray::pop_back", 0);
        assert_eq!(
            format!("{error}"),
            "DynamicArray::pop_back: no such element (len is 0)"
        );
    }

    #[rstest]
    fn test_length_error_display() {
        let error = LengthError {
            operation: "DynamicArray::resize",
            requested: usize::MAX,
            max_size: 42,
        };
        assert_eq!(
            format!("{error}"),
            format!("DynamicArray::resize: requested length {} exceeds max_size 42", usize::MAX)
        );
    }

    #[rstest]
    fn test_container_error_from_and_source() {
        let error: ContainerError = OutOfRangeError::missing("Stack::pop", 0).into();
        assert_eq!(format!("{error}"), "Stack::pop: no such element (len is 0)");
        assert!(error.source().is_some());

        let error: ContainerError = LengthError {
            operation: "DynamicArray::reserve",
            requested: 3,
            max_size: 2,
        }
        .into();
        assert!(matches!(error, ContainerError::Length(_)));
    }
}
