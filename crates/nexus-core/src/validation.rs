//! # Validation Module
//!
//! Form-level validation for the course wizard.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Two Kinds of Checks                                │
//! │                                                                         │
//! │  While typing (calculators)                                            │
//! │  ├── Clamp: duration < 1 → 1, negative limit → 0                       │
//! │  └── Never fail, the preview keeps rendering                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  On submit (THIS MODULE)                                               │
//! │  ├── Reject out-of-range values with a field message                   │
//! │  └── Parse typed amounts ("R$ 12,50") into Money                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nexus_core::validation::{parse_money_input, validate_course_duration};
//!
//! assert_eq!(parse_money_input("R$ 1.234,50").unwrap().cents(), 123_450);
//! assert!(validate_course_duration(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::policy::PricingPolicy;
use crate::{MAX_COURSE_DURATION_DAYS, MAX_KIT_ITEM_DESCRIPTION_LEN, MAX_KIT_ITEM_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a kit item name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most `MAX_KIT_ITEM_NAME_LEN` characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_kit_item_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_KIT_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_KIT_ITEM_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a kit item description. Empty is allowed.
pub fn validate_kit_item_description(description: &str) -> ValidationResult<String> {
    let description = description.trim();

    if description.chars().count() > MAX_KIT_ITEM_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_KIT_ITEM_DESCRIPTION_LEN,
        });
    }

    Ok(description.to_string())
}

// =============================================================================
// Money Input
// =============================================================================

/// Parses a typed amount into Money.
///
/// ## Accepted Forms
/// ```text
/// "12"  "12.5"  "12,50"  "R$ 12,50"  "1.234,50"  "1,234.50"  "-3,00"
/// ```
/// When both `.` and `,` appear, the last one is the decimal separator.
/// A separator repeated on its own (`1.234.567`) is a thousands separator.
/// At most two decimal places.
pub fn parse_money_input(input: &str) -> ValidationResult<Money> {
    let field = "amount";
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    let cleaned: String = input
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let (negative, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };

    let decimal_sep = match (unsigned.rfind('.'), unsigned.rfind(',')) {
        (Some(dot), Some(comma)) => Some(if dot > comma { '.' } else { ',' }),
        (Some(_), None) if unsigned.matches('.').count() == 1 => Some('.'),
        (None, Some(_)) if unsigned.matches(',').count() == 1 => Some(','),
        _ => None,
    };

    let (whole, fraction) = match decimal_sep.and_then(|sep| unsigned.rfind(sep)) {
        Some(idx) => (&unsigned[..idx], &unsigned[idx + 1..]),
        None => (unsigned, ""),
    };

    let whole: String = whole.chars().filter(|c| *c != '.' && *c != ',').collect();

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("must contain digits"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid("must be a number like 12,50"));
    }
    if fraction.len() > 2 {
        return Err(invalid("must have at most 2 decimal places"));
    }

    let reais: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid("is too large"))?
    };
    let centavos: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| invalid("is not a number"))? * 10,
        _ => fraction.parse::<i64>().map_err(|_| invalid("is not a number"))?,
    };

    let cents = reais
        .checked_mul(100)
        .and_then(|c| c.checked_add(centavos))
        .ok_or_else(|| invalid("is too large"))?;

    Ok(Money::from_cents(if negative { -cents } else { cents }))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cost: zero is allowed (free kit items), negative is not.
pub fn validate_cost(cost: Money) -> ValidationResult<()> {
    if cost.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "cost".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a sale price. Must be positive.
pub fn validate_sale_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "sale price".to_string(),
        });
    }

    Ok(())
}

/// Validates a daily interaction limit against the policy's slider bounds.
///
/// ## Example
/// ```rust
/// use nexus_core::policy::PricingPolicy;
/// use nexus_core::validation::validate_daily_limit;
///
/// let policy = PricingPolicy::default();
/// assert!(validate_daily_limit(30, &policy).is_ok());
/// assert!(validate_daily_limit(151, &policy).is_err());
/// ```
pub fn validate_daily_limit(limit: i64, policy: &PricingPolicy) -> ValidationResult<()> {
    if limit < policy.daily_limit_min || limit > policy.daily_limit_max {
        return Err(ValidationError::OutOfRange {
            field: "daily limit".to_string(),
            min: policy.daily_limit_min,
            max: policy.daily_limit_max,
        });
    }

    Ok(())
}

/// Validates a course duration in days.
///
/// ## Rules
/// - At least 1 day
/// - At most `MAX_COURSE_DURATION_DAYS`
pub fn validate_course_duration(days: i64) -> ValidationResult<()> {
    if days < 1 || days > MAX_COURSE_DURATION_DAYS {
        return Err(ValidationError::OutOfRange {
            field: "course duration".to_string(),
            min: 1,
            max: MAX_COURSE_DURATION_DAYS,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_kit_item_name() {
        assert_eq!(validate_kit_item_name("  Fita Cetose ").unwrap(), "Fita Cetose");
        assert!(validate_kit_item_name("").is_err());
        assert!(validate_kit_item_name("   ").is_err());
        assert!(validate_kit_item_name(&"A".repeat(MAX_KIT_ITEM_NAME_LEN + 1)).is_err());
        // limit counts characters, not bytes
        assert!(validate_kit_item_name(&"ç".repeat(MAX_KIT_ITEM_NAME_LEN)).is_ok());
    }

    #[test]
    fn test_validate_kit_item_description() {
        assert_eq!(validate_kit_item_description("").unwrap(), "");
        assert!(validate_kit_item_description(&"x".repeat(MAX_KIT_ITEM_DESCRIPTION_LEN + 1)).is_err());
    }

    #[test]
    fn test_parse_money_input() {
        assert_eq!(parse_money_input("12").unwrap().cents(), 1_200);
        assert_eq!(parse_money_input("12.5").unwrap().cents(), 1_250);
        assert_eq!(parse_money_input("12,50").unwrap().cents(), 1_250);
        assert_eq!(parse_money_input("R$ 12,50").unwrap().cents(), 1_250);
        assert_eq!(parse_money_input("1.234,50").unwrap().cents(), 123_450);
        assert_eq!(parse_money_input("1,234.50").unwrap().cents(), 123_450);
        assert_eq!(parse_money_input("1.234.567").unwrap().cents(), 123_456_700);
        assert_eq!(parse_money_input(",75").unwrap().cents(), 75);
        assert_eq!(parse_money_input("-3,00").unwrap().cents(), -300);
    }

    #[test]
    fn test_parse_money_input_rejects_garbage() {
        assert!(matches!(
            parse_money_input("  "),
            Err(ValidationError::Required { .. })
        ));
        assert!(parse_money_input("abc").is_err());
        assert!(parse_money_input("12,345").is_err());
        assert!(parse_money_input("1e5").is_err());
        assert!(parse_money_input("R$").is_err());
        assert!(parse_money_input("-").is_err());
        assert!(parse_money_input("99999999999999999999").is_err());
    }

    #[test]
    fn test_validate_cost() {
        assert!(validate_cost(Money::zero()).is_ok());
        assert!(validate_cost(Money::from_cents(1_250)).is_ok());
        assert!(validate_cost(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_sale_price() {
        assert!(validate_sale_price(Money::from_cents(19_700)).is_ok());
        assert!(validate_sale_price(Money::zero()).is_err());
    }

    #[test]
    fn test_validate_daily_limit() {
        let policy = PricingPolicy::default();
        assert!(validate_daily_limit(5, &policy).is_ok());
        assert!(validate_daily_limit(150, &policy).is_ok());
        assert!(validate_daily_limit(4, &policy).is_err());
        assert_eq!(
            validate_daily_limit(151, &policy).unwrap_err().to_string(),
            "daily limit must be between 5 and 150"
        );
    }

    #[test]
    fn test_validate_course_duration() {
        assert!(validate_course_duration(1).is_ok());
        assert!(validate_course_duration(30).is_ok());
        assert!(validate_course_duration(0).is_err());
        assert!(validate_course_duration(-3).is_err());
        assert!(validate_course_duration(MAX_COURSE_DURATION_DAYS + 1).is_err());
    }
}
