pub mod assistant;
pub mod edit_session;
pub mod portfolio_store;
pub mod stock_lookup;
