pub mod chart;
pub mod inventory;
pub mod metrics;
pub mod submission;
pub mod user;

pub use chart::*;
pub use inventory::*;
pub use metrics::*;
pub use submission::*;
pub use user::*;
