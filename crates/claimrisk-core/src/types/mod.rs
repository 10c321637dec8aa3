//! Record table types and cleaning choices.

pub mod bounds;
pub mod policy;
pub mod table;
pub mod value;

pub use bounds::Bounds;
pub use policy::{CleaningPolicy, DuplicateAction};
pub use table::Table;
pub use value::{CategoryKey, Value};
