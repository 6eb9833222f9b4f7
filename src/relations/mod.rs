// SPDX-License-Identifier: MPL-2.0

mod belongs_to;
mod photos;
pub mod registry;
pub mod resolve;
mod users;

pub use belongs_to::{CommentRelations, FollowRequestRelations, LikeRelations};
pub use photos::PhotoRelations;
pub use users::{UnknownView, UserRelations, UserView, ViewRows};
