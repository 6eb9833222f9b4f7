// SPDX-License-Identifier: MPL-2.0

//! Single-row accessors for the join entities.

use crate::model::{Comment, FollowRequest, Like, Photo, User};
use crate::relations::registry;
use crate::relations::resolve;
use crate::store::{Store, StoreError};

pub struct LikeRelations<'a> {
    db: &'a Store,
    like: &'a Like,
}

impl<'a> LikeRelations<'a> {
    pub fn new(db: &'a Store, like: &'a Like) -> Self {
        Self { db, like }
    }

    pub fn fan(&self) -> Result<Option<User>, StoreError> {
        resolve::belongs_to(&self.db.conn(), &registry::LIKE_FAN, self.like.fan_id)
    }

    pub fn photo(&self) -> Result<Option<Photo>, StoreError> {
        resolve::belongs_to(&self.db.conn(), &registry::LIKE_PHOTO, self.like.photo_id)
    }
}

pub struct CommentRelations<'a> {
    db: &'a Store,
    comment: &'a Comment,
}

impl<'a> CommentRelations<'a> {
    pub fn new(db: &'a Store, comment: &'a Comment) -> Self {
        Self { db, comment }
    }

    pub fn author(&self) -> Result<Option<User>, StoreError> {
        resolve::belongs_to(&self.db.conn(), &registry::COMMENT_AUTHOR, self.comment.author_id)
    }

    pub fn photo(&self) -> Result<Option<Photo>, StoreError> {
        resolve::belongs_to(&self.db.conn(), &registry::COMMENT_PHOTO, self.comment.photo_id)
    }
}

pub struct FollowRequestRelations<'a> {
    db: &'a Store,
    request: &'a FollowRequest,
}

impl<'a> FollowRequestRelations<'a> {
    pub fn new(db: &'a Store, request: &'a FollowRequest) -> Self {
        Self { db, request }
    }

    pub fn sender(&self) -> Result<Option<User>, StoreError> {
        resolve::belongs_to(
            &self.db.conn(),
            &registry::FOLLOW_REQUEST_SENDER,
            self.request.sender_id,
        )
    }

    pub fn recipient(&self) -> Result<Option<User>, StoreError> {
        resolve::belongs_to(
            &self.db.conn(),
            &registry::FOLLOW_REQUEST_RECIPIENT,
            self.request.recipient_id,
        )
    }
}
