pub mod line_item;
pub mod order;
pub mod product;
pub mod user;

pub use line_item::*;
pub use order::*;
pub use product::*;
pub use user::*;
