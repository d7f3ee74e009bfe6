//! Bulk-sync results

use crate::validator::ItemError;
use instaplot_domain::Card;

/// Outcome counts for one bulk-sync pass
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    /// Items in the input array
    pub total: usize,

    /// Items that became cards
    pub accepted: usize,

    /// One entry per rejected item, in input order
    pub errors: Vec<ItemError>,
}

impl SyncReport {
    /// Every item was accepted
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// At least one item was accepted, so the board should be replaced
    pub fn is_applicable(&self) -> bool {
        self.accepted > 0
    }

    /// Number of rejected items
    pub fn rejected(&self) -> usize {
        self.errors.len()
    }

    /// One-line, user-facing outcome
    ///
    /// # Examples
    ///
    /// ```
    /// use instaplot_gatekeeper::SyncReport;
    ///
    /// let report = SyncReport { total: 2, accepted: 2, errors: vec![] };
    /// assert_eq!(report.summary(), "Imported 2 cards");
    /// ```
    pub fn summary(&self) -> String {
        match (self.accepted, self.errors.len()) {
            (0, 0) => "No cards found".to_string(),
            (0, rejected) => format!("No valid cards found ({} {})", rejected, plural(rejected, "error")),
            (accepted, 0) => format!("Imported {} {}", accepted, plural(accepted, "card")),
            (accepted, rejected) => format!(
                "Imported {} {} with {} {}",
                accepted,
                plural(accepted, "card"),
                rejected,
                plural(rejected, "error")
            ),
        }
    }

    /// Summary followed by one line per rejected item
    pub fn detailed(&self) -> String {
        let mut lines = vec![self.summary()];
        lines.extend(self.errors.iter().map(|e| format!("  {}", e)));
        lines.join("\n")
    }
}

/// Accepted cards together with the report that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct SyncBatch {
    /// Accepted cards, in input order, with unique ids
    pub cards: Vec<Card>,

    /// Counts and rejections
    pub report: SyncReport,
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{}s", noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::RejectionReason;
    use instaplot_domain::CardField;

    fn error(index: usize) -> ItemError {
        ItemError {
            index,
            reason: RejectionReason::MissingField(CardField::Claims),
        }
    }

    #[test]
    fn test_summary_variants() {
        let full = SyncReport { total: 1, accepted: 1, errors: vec![] };
        assert_eq!(full.summary(), "Imported 1 card");
        assert!(full.is_complete());

        let partial = SyncReport { total: 3, accepted: 2, errors: vec![error(1)] };
        assert_eq!(partial.summary(), "Imported 2 cards with 1 error");
        assert!(partial.is_applicable());

        let none = SyncReport { total: 2, accepted: 0, errors: vec![error(0), error(1)] };
        assert_eq!(none.summary(), "No valid cards found (2 errors)");
        assert!(!none.is_applicable());

        let empty = SyncReport { total: 0, accepted: 0, errors: vec![] };
        assert_eq!(empty.summary(), "No cards found");
    }

    #[test]
    fn test_detailed_lists_items() {
        let report = SyncReport { total: 3, accepted: 2, errors: vec![error(1)] };
        assert_eq!(
            report.detailed(),
            "Imported 2 cards with 1 error\n  item 2: missing field `claims`"
        );
    }
}
