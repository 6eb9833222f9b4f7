// SPDX-License-Identifier: MPL-2.0

//! The association graph as a static table.
//!
//! Each entry names the tables and key columns a resolver joins through.
//! The generic resolvers in `resolve` interpret these descriptors, so adding
//! an association is a matter of adding a constant here.

use crate::model::FollowStatus;
use crate::store::Table;

/// Extra `column = value` condition applied on top of the foreign key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub column: &'static str,
    pub value: &'static str,
}

/// Rows of `target` whose `foreign_key` column holds the owner's id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasMany {
    pub name: &'static str,
    pub target: Table,
    pub foreign_key: &'static str,
    pub scope: Option<Scope>,
}

/// The single row of `target` referenced by `foreign_key` on `source`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BelongsTo {
    pub name: &'static str,
    pub source: Table,
    pub foreign_key: &'static str,
    pub target: Table,
}

/// Two hops: resolve `via`, take `source_key` from every row, then load
/// `target` rows by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Through {
    pub name: &'static str,
    pub via: HasMany,
    pub source_key: &'static str,
    pub target: Table,
    /// Extra identity pass over the loaded targets. Membership loading
    /// already collapses repeated keys; this keeps the set guarantee
    /// independent of how the target rows were fetched.
    pub distinct: bool,
}

/// Collection resolved for each intermediate row of a `Composed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Secondary {
    HasMany(HasMany),
    Through(Through),
}

impl Secondary {
    pub const fn target(&self) -> Table {
        match self {
            Secondary::HasMany(assoc) => assoc.target,
            Secondary::Through(assoc) => assoc.target,
        }
    }
}

/// Three hops: resolve `through`, resolve `source` for each of its rows,
/// and load the union of their ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Composed {
    pub name: &'static str,
    pub through: Through,
    pub source: Secondary,
}

const ACCEPTED: Scope = Scope {
    column: "status",
    value: FollowStatus::Accepted.as_str(),
};

// Direct

pub const COMMENTS: HasMany = HasMany {
    name: "comments",
    target: Table::Comments,
    foreign_key: "author_id",
    scope: None,
};

pub const OWN_PHOTOS: HasMany = HasMany {
    name: "own_photos",
    target: Table::Photos,
    foreign_key: "owner_id",
    scope: None,
};

pub const LIKES: HasMany = HasMany {
    name: "likes",
    target: Table::Likes,
    foreign_key: "fan_id",
    scope: None,
};

pub const SENT_FOLLOW_REQUESTS: HasMany = HasMany {
    name: "sent_follow_requests",
    target: Table::FollowRequests,
    foreign_key: "sender_id",
    scope: None,
};

pub const RECEIVED_FOLLOW_REQUESTS: HasMany = HasMany {
    name: "received_follow_requests",
    target: Table::FollowRequests,
    foreign_key: "recipient_id",
    scope: None,
};

pub const PHOTO_LIKES: HasMany = HasMany {
    name: "photo_likes",
    target: Table::Likes,
    foreign_key: "photo_id",
    scope: None,
};

pub const PHOTO_COMMENTS: HasMany = HasMany {
    name: "photo_comments",
    target: Table::Comments,
    foreign_key: "photo_id",
    scope: None,
};

// Scoped

pub const ACCEPTED_SENT_FOLLOW_REQUESTS: HasMany = HasMany {
    name: "accepted_sent_follow_requests",
    scope: Some(ACCEPTED),
    ..SENT_FOLLOW_REQUESTS
};

pub const ACCEPTED_RECEIVED_FOLLOW_REQUESTS: HasMany = HasMany {
    name: "accepted_received_follow_requests",
    scope: Some(ACCEPTED),
    ..RECEIVED_FOLLOW_REQUESTS
};

// Belongs to

pub const LIKE_FAN: BelongsTo = BelongsTo {
    name: "fan",
    source: Table::Likes,
    foreign_key: "fan_id",
    target: Table::Users,
};

pub const LIKE_PHOTO: BelongsTo = BelongsTo {
    name: "photo",
    source: Table::Likes,
    foreign_key: "photo_id",
    target: Table::Photos,
};

pub const COMMENT_AUTHOR: BelongsTo = BelongsTo {
    name: "author",
    source: Table::Comments,
    foreign_key: "author_id",
    target: Table::Users,
};

pub const COMMENT_PHOTO: BelongsTo = BelongsTo {
    name: "photo",
    source: Table::Comments,
    foreign_key: "photo_id",
    target: Table::Photos,
};

pub const PHOTO_OWNER: BelongsTo = BelongsTo {
    name: "owner",
    source: Table::Photos,
    foreign_key: "owner_id",
    target: Table::Users,
};

pub const FOLLOW_REQUEST_SENDER: BelongsTo = BelongsTo {
    name: "sender",
    source: Table::FollowRequests,
    foreign_key: "sender_id",
    target: Table::Users,
};

pub const FOLLOW_REQUEST_RECIPIENT: BelongsTo = BelongsTo {
    name: "recipient",
    source: Table::FollowRequests,
    foreign_key: "recipient_id",
    target: Table::Users,
};

// Two hops

pub const LIKED_PHOTOS: Through = Through {
    name: "liked_photos",
    via: LIKES,
    source_key: "photo_id",
    target: Table::Photos,
    // UNIQUE(fan_id, photo_id) already rules out repeats
    distinct: false,
};

pub const COMMENTED_PHOTOS: Through = Through {
    name: "commented_photos",
    via: COMMENTS,
    source_key: "photo_id",
    target: Table::Photos,
    distinct: true,
};

pub const FOLLOWERS: Through = Through {
    name: "followers",
    via: ACCEPTED_RECEIVED_FOLLOW_REQUESTS,
    source_key: "sender_id",
    target: Table::Users,
    distinct: false,
};

pub const LEADERS: Through = Through {
    name: "leaders",
    via: ACCEPTED_SENT_FOLLOW_REQUESTS,
    source_key: "recipient_id",
    target: Table::Users,
    distinct: false,
};

pub const FANS: Through = Through {
    name: "fans",
    via: PHOTO_LIKES,
    source_key: "fan_id",
    target: Table::Users,
    distinct: false,
};

// Three hops

pub const FEED: Composed = Composed {
    name: "feed",
    through: LEADERS,
    source: Secondary::HasMany(OWN_PHOTOS),
};

pub const DISCOVER: Composed = Composed {
    name: "discover",
    through: LEADERS,
    source: Secondary::Through(LIKED_PHOTOS),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_associations_extend_their_base() {
        assert_eq!(ACCEPTED_SENT_FOLLOW_REQUESTS.foreign_key, "sender_id");
        assert_eq!(ACCEPTED_RECEIVED_FOLLOW_REQUESTS.foreign_key, "recipient_id");
        assert_eq!(ACCEPTED_SENT_FOLLOW_REQUESTS.scope.map(|s| s.value), Some("accepted"));
        assert!(SENT_FOLLOW_REQUESTS.scope.is_none());
    }

    #[test]
    fn test_composed_targets_are_photos() {
        assert_eq!(FEED.source.target(), Table::Photos);
        assert_eq!(DISCOVER.source.target(), Table::Photos);
        assert_eq!(FEED.through.target, Table::Users);
    }
}
