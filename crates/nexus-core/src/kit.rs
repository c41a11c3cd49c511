//! # Physical Kit
//!
//! Courses can ship physical materials (test strips, workbooks, sensors).
//! Producers describe each item so generated lessons can cover unboxing
//! and use.
//!
//! ## Add Item Flow
//! ```text
//! KitItemForm { name, description, cost: "12,50", requires_ocr }
//!      │
//!      ▼
//! submit() ── name empty / cost unparseable? ──► ValidationError (form kept)
//!      │
//!      ▼
//! KitItem { id: "kit-<uuid>", cost: Money, added_at }   form reset
//!      │
//!      ▼
//! PhysicalKit::add(item)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{
    parse_money_input, validate_cost, validate_kit_item_description, validate_kit_item_name,
    ValidationResult,
};
use crate::MAX_KIT_ITEMS;

/// One physical item sent to students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KitItem {
    /// `kit-` followed by a UUID v4.
    pub id: String,
    pub name: String,
    /// Usage notes the lesson generator reads.
    pub description: String,
    /// Unit cost.
    pub cost: Money,
    /// Students photograph a reading that must be OCR'd (e.g. ketone strip).
    pub requires_ocr: bool,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

// =============================================================================
// Form State
// =============================================================================

/// Unsubmitted input for a new kit item, with cost still as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KitItemForm {
    pub name: String,
    pub description: String,
    pub cost: String,
    pub requires_ocr: bool,
}

impl KitItemForm {
    /// Validates the form and turns it into a [`KitItem`].
    ///
    /// On success the form is cleared for the next item; on failure it is
    /// left untouched so the producer can fix it.
    pub fn submit(&mut self) -> ValidationResult<KitItem> {
        let name = validate_kit_item_name(&self.name)?;
        let description = validate_kit_item_description(&self.description)?;
        let cost = parse_money_input(&self.cost).map_err(|err| match err {
            ValidationError::Required { .. } => ValidationError::Required {
                field: "cost".to_string(),
            },
            ValidationError::InvalidFormat { reason, .. } => ValidationError::InvalidFormat {
                field: "cost".to_string(),
                reason,
            },
            other => other,
        })?;
        validate_cost(cost)?;

        let item = KitItem {
            id: format!("kit-{}", Uuid::new_v4()),
            name,
            description,
            cost,
            requires_ocr: self.requires_ocr,
            added_at: Utc::now(),
        };

        *self = KitItemForm::default();
        Ok(item)
    }
}

// =============================================================================
// Kit
// =============================================================================

/// The kit attached to a course.
///
/// ## Invariants
/// - Item names are unique (case-insensitive)
/// - At most `MAX_KIT_ITEMS` items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalKit {
    pub enabled: bool,
    items: Vec<KitItem>,
}

impl PhysicalKit {
    pub fn items(&self) -> &[KitItem] {
        &self.items
    }

    pub fn add(&mut self, item: KitItem) -> CoreResult<()> {
        if self.items.len() >= MAX_KIT_ITEMS {
            return Err(ValidationError::OutOfRange {
                field: "kit items".to_string(),
                min: 0,
                max: MAX_KIT_ITEMS as i64,
            }
            .into());
        }

        let wanted = item.name.to_lowercase();
        if self.items.iter().any(|i| i.name.to_lowercase() == wanted) {
            return Err(ValidationError::Duplicate {
                field: "kit item".to_string(),
                value: item.name,
            }
            .into());
        }

        self.items.push(item);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> CoreResult<KitItem> {
        let idx = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CoreError::KitItemNotFound(id.to_string()))?;
        Ok(self.items.remove(idx))
    }

    /// Cost of one full kit.
    pub fn total_cost(&self) -> Money {
        self.items.iter().map(|i| i.cost).sum()
    }

    /// True when any item needs OCR reading.
    pub fn requires_ocr(&self) -> bool {
        self.items.iter().any(|i| i.requires_ocr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, cost: &str, ocr: bool) -> KitItemForm {
        KitItemForm {
            name: name.to_string(),
            description: "Usar ao acordar".to_string(),
            cost: cost.to_string(),
            requires_ocr: ocr,
        }
    }

    #[test]
    fn test_submit_valid_form() {
        let mut f = form("Fita Cetose", "R$ 12,50", true);
        let item = f.submit().unwrap();

        assert!(item.id.starts_with("kit-"));
        assert_eq!(item.id.len(), "kit-".len() + 36);
        assert_eq!(item.name, "Fita Cetose");
        assert_eq!(item.cost.cents(), 1_250);
        assert!(item.requires_ocr);

        // form is cleared after a successful submit
        assert_eq!(f, KitItemForm::default());
    }

    #[test]
    fn test_submit_invalid_form_keeps_input() {
        let mut f = form("", "12,50", false);
        assert!(matches!(f.submit(), Err(ValidationError::Required { .. })));
        assert_eq!(f.cost, "12,50");

        let mut f = form("Fita", "doze", false);
        let err = f.submit().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "cost"));
        assert_eq!(f.name, "Fita");

        let mut f = form("Fita", "", false);
        assert_eq!(
            f.submit().unwrap_err(),
            ValidationError::Required {
                field: "cost".to_string()
            }
        );

        let mut f = form("Fita", "-1", false);
        assert!(matches!(f.submit(), Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn test_submit_ids_are_unique() {
        let a = form("A", "1", false).submit().unwrap();
        let b = form("B", "1", false).submit().unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_kit_add_remove_and_totals() {
        let mut kit = PhysicalKit {
            enabled: true,
            ..PhysicalKit::default()
        };
        let strip = form("Fita Cetose", "12,50", true).submit().unwrap();
        let book = form("Apostila", "30", false).submit().unwrap();
        let strip_id = strip.id.clone();

        kit.add(strip).unwrap();
        kit.add(book).unwrap();
        assert_eq!(kit.items().len(), 2);
        assert_eq!(kit.total_cost().cents(), 4_250);
        assert!(kit.requires_ocr());

        let removed = kit.remove(&strip_id).unwrap();
        assert_eq!(removed.name, "Fita Cetose");
        assert!(!kit.requires_ocr());
        assert!(matches!(
            kit.remove(&strip_id),
            Err(CoreError::KitItemNotFound(_))
        ));
    }

    #[test]
    fn test_kit_rejects_duplicate_names() {
        let mut kit = PhysicalKit::default();
        kit.add(form("Apostila", "30", false).submit().unwrap()).unwrap();
        let err = kit
            .add(form("APOSTILA", "25", false).submit().unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_kit_item_limit() {
        let mut kit = PhysicalKit::default();
        for i in 0..MAX_KIT_ITEMS {
            kit.add(form(&format!("Item {}", i), "1", false).submit().unwrap())
                .unwrap();
        }
        assert!(kit
            .add(form("One more", "1", false).submit().unwrap())
            .is_err());
    }
}
