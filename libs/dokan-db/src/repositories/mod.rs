pub mod order_repo;
pub mod redeem_repo;
pub mod service_repo;
pub mod stock_repo;
pub mod user_repo;
