pub mod orders;
pub mod products;
pub mod purchases;
