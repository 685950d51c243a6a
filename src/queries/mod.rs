//! Query modules for the retail dashboard SDK.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) and exposes typed methods
//! returning `Result<T>`.

pub mod auth;
pub mod dashboard;
pub mod products;
pub mod submissions;
pub mod users;

pub use auth::AuthQuery;
pub use dashboard::DashboardQuery;
pub use products::{CustomerQuery, ProductQuery};
pub use submissions::{ImportQuery, OrderQuery};
pub use users::UserQuery;
