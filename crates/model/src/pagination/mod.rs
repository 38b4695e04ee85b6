pub mod codec;
pub mod cursor;
pub mod sort;
