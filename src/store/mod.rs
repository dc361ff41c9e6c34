pub mod accounts;
pub mod bootstrap;
pub mod catalog;
pub mod codec;
pub mod ledger;
