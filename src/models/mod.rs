pub mod artwork;
pub mod collection;
pub mod comment;
pub mod common;
pub mod contest;
pub mod follow;
pub mod pagination;
pub mod portfolio;
pub mod rating;
pub mod user;
pub mod verification;

pub use artwork::*;
pub use collection::*;
pub use comment::*;
pub use common::*;
pub use contest::*;
pub use follow::*;
pub use pagination::*;
pub use portfolio::*;
pub use rating::*;
pub use user::*;
pub use verification::*;
