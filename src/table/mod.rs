pub mod display;
pub mod filter;
pub mod sort;
pub mod view;
