pub mod apply;
pub mod criteria;
pub mod parser;

pub use apply::{apply_filters, matches_filters};
pub use criteria::{FilterField, SearchFilters};
pub use parser::parse_filter;
