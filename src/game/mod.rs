pub mod filter;
pub mod image;
pub mod presenter;
pub mod session;
