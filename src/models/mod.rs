pub mod campaign;
pub mod customer;
pub mod order;
pub mod product;
pub mod schema;

pub use campaign::*;
pub use customer::*;
pub use order::*;
pub use product::*;
pub use schema::*;
