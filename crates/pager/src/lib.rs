pub mod entities;
pub mod entity;
pub mod error;
pub mod pager;
pub mod request;
