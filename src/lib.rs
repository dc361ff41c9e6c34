pub mod app;
pub mod checkout;
pub mod common;
pub mod domain;
pub mod store;
