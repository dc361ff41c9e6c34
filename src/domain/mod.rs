pub mod account;
pub mod bill;
pub mod product;
