pub mod category;
pub mod criteria;
pub mod measure;
pub mod record;
pub mod traits;
