//! Market data aggregate containing entities, history and value objects.

pub mod entities;
pub mod history;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use history::*;
pub use repositories::*;
pub use value_objects::*;
