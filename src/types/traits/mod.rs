pub mod any_date;
pub mod types;
pub(crate) mod utils;
