//! Domain models
//!
//! Wire-level types of a ranklist document plus the resolved forms of the
//! sorter and series configuration.

pub mod contest;
pub mod problem;
pub mod ranklist;
pub mod series;
pub mod sorter;
pub mod submission;
pub mod user;

pub use contest::*;
pub use problem::*;
pub use ranklist::*;
pub use series::*;
pub use sorter::*;
pub use submission::*;
pub use user::*;
