use common::ShelfStatistics;
use model::entities::book;
use rust_decimal::Decimal;
use tracing::instrument;

/// Compute the dashboard aggregates for one user's shelf.
///
/// Pure function over the already-fetched book rows: the count, the mean
/// rating rounded to one decimal place (zero for an empty shelf), and how
/// many books carry a non-blank note.
#[instrument(skip(books), fields(total = books.len()))]
pub fn shelf_statistics(books: &[book::Model]) -> ShelfStatistics {
    if books.is_empty() {
        return ShelfStatistics::empty();
    }

    let total_books = books.len() as u64;
    let sum: Decimal = books.iter().map(|book| book.rating).sum();
    let average_rating = (sum / Decimal::from(total_books)).round_dp(1);
    let annotated_count = books
        .iter()
        .filter(|book| has_notes(book.notes.as_deref()))
        .count() as u64;

    ShelfStatistics {
        total_books,
        average_rating,
        annotated_count,
    }
}

fn has_notes(notes: Option<&str>) -> bool {
    notes.is_some_and(|text| !text.trim().is_empty())
}
