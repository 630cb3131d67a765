//! Error types for binding and emission

use thiserror::Error;

/// Main error type for binding and emission.
///
/// Failures inside the shape candidate loop are caught and recorded per
/// candidate; only exhaustion of every candidate surfaces, as
/// [`BindError::Aggregate`]. Deterministic failures (leaf conversion, enum
/// parse, array-build exhaustion, emission of an unrepresentable value)
/// propagate immediately.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    /// The target type exposes no usable construction plan at all
    #[error("no usable shape registered for type {type_name}")]
    ShapeNotFound {
        /// Name of the target type
        type_name: String,
    },

    /// A required member has no corresponding table key
    #[error("no value for required member {field} of {shape}")]
    MissingRequiredField {
        /// The missing member's name
        field: String,
        /// Signature of the shape being tried
        shape: String,
    },

    /// No identity or registered conversion between two types
    #[error("no conversion from {from} to {to}")]
    TypeConversion {
        /// Source type name
        from: String,
        /// Destination type name
        to: String,
    },

    /// A string failed to parse as an enum variant name
    #[error("no variant named {value:?} in enum {enum_name}")]
    Format {
        /// The attempted value
        value: String,
        /// Name of the enum type
        enum_name: String,
    },

    /// No collection-builder strategy produced the target from an array
    #[error("no strategy built {type_name} from an array node")]
    ArrayBuild {
        /// Name of the target type
        type_name: String,
    },

    /// Every shape candidate for a table failed
    #[error("all shape candidates for {type_name} failed: [{}]", format_causes(.causes))]
    Aggregate {
        /// Name of the target type
        type_name: String,
        /// Per-candidate failures, in candidate order
        causes: Vec<CandidateFailure>,
    },

    /// The recursion guard tripped on a deeply nested tree
    #[error("binding depth exceeded the maximum of {max}")]
    DepthExceeded {
        /// The configured maximum depth
        max: usize,
    },

    /// A null leaf was encountered (absence must be a missing key)
    #[error("null node cannot be bound; absence is expressed by a missing key")]
    UnexpectedNull,
}

/// One recorded failure from the shape candidate loop.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFailure {
    /// Signature of the candidate that failed, e.g. `Point(x: i64, y: i64)`
    pub shape: String,

    /// Why it failed
    pub error: BindError,
}

fn format_causes(causes: &[CandidateFailure]) -> String {
    causes
        .iter()
        .map(|c| format!("{}: {}", c.shape, c.error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for binding and emission.
pub type Result<T> = std::result::Result<T, BindError>;
