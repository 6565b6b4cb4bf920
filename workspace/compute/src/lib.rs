pub mod shelf;

pub use shelf::shelf_statistics;
