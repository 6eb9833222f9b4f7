// SPDX-License-Identifier: MPL-2.0

//! Data model and association resolver for a photo-sharing app.
//!
//! Users own photos, like and comment on them, and follow each other through
//! follow requests. `store` persists the five entities in SQLite and
//! `relations` derives every association between them, from a user's own
//! photos up to the three-hop `feed` and `discover` views.

pub mod config;
pub mod logging;
pub mod model;
pub mod relations;
pub mod state;
pub mod store;

pub use model::{Comment, FollowRequest, FollowStatus, Like, Photo, User};
pub use relations::{PhotoRelations, UserRelations, UserView};
pub use store::{Store, StoreError, ValidationError, ValidationKind};
