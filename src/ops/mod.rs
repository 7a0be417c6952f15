pub mod filter;
pub mod selection;
pub mod since;
pub mod store;
