//! # Error Types
//!
//! Domain-specific error types for nexus-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  nexus-core errors (this file)                                         │
//! │  ├── CoreError        - Domain errors (catalog, kit, policy)           │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  nexus-config errors (separate crate)                                  │
//! │  └── ConfigError      - File / TOML / environment failures             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ConfigError → UI toast            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! The calculators (credits, tools, dilution, cashflow) are total: they
//! clamp bad numeric input and skip unknown tool ids. A CPF that fails its
//! checksum is a `false`, not an error. Errors only appear on explicit
//! lookups and on form submission.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Failures of explicit lookups, kit edits and policy checks.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Tool id is not present in the injected catalog.
    ///
    /// ## When This Occurs
    /// Only on explicit lookups (`ToolCatalog::get`). Aggregation silently
    /// skips unknown ids because persisted selections may be stale.
    #[error("Tool not found in catalog: {0}")]
    ToolNotFound(String),

    /// A catalog was built with the same tool id twice.
    #[error("Tool '{0}' appears more than once in the catalog")]
    DuplicateTool(String),

    /// Kit item cannot be found.
    #[error("Kit item not found: {0}")]
    KitItemNotFound(String),

    /// Pricing policy values are inconsistent.
    ///
    /// ## When This Occurs
    /// - Deduction rate of zero (break-even would divide by zero)
    /// - Zero content mass or exchange rate
    /// - Daily limit minimum above maximum
    #[error("Invalid pricing policy: {reason}")]
    InvalidPolicy { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level failures from wizard forms.
///
/// These errors occur when form input doesn't meet requirements.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., CPF checksum mismatch, unparseable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., kit item added twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result of fallible core operations.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
