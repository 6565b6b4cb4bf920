use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregates computed over a user's shelf, shown on the dashboard.
///
/// `average_rating` is rounded to one decimal place and is zero for an
/// empty shelf. `annotated_count` counts books whose notes are non-blank
/// after trimming whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfStatistics {
    pub total_books: u64,
    pub average_rating: Decimal,
    pub annotated_count: u64,
}

impl ShelfStatistics {
    /// Statistics for a shelf with no books on it.
    pub fn empty() -> Self {
        Self {
            total_books: 0,
            average_rating: Decimal::ZERO,
            annotated_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_shelf_has_zero_average() {
        let stats = ShelfStatistics::empty();
        assert_eq!(stats.total_books, 0);
        assert_eq!(stats.average_rating, Decimal::ZERO);
        assert_eq!(stats.annotated_count, 0);
    }

    #[test]
    fn rating_serializes_as_decimal_string() {
        let stats = ShelfStatistics {
            total_books: 3,
            average_rating: Decimal::new(40, 1),
            annotated_count: 2,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["average_rating"], "4.0");
    }
}
