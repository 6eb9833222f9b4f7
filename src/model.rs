// SPDX-License-Identifier: MPL-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type UserId = i64;
pub type PhotoId = i64;
pub type LikeId = i64;
pub type CommentId = i64;
pub type FollowRequestId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub private: bool,
    /// Denormalized; maintained by comment creation and deletion
    pub comments_count: i64,
    /// Denormalized; maintained by like creation and deletion
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub owner_id: UserId,
    pub caption: Option<String>,
    /// Location of the image file or URL
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A fan liking a photo. At most one per (fan, photo) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub id: LikeId,
    pub fan_id: UserId,
    pub photo_id: PhotoId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author_id: UserId,
    pub photo_id: PhotoId,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowRequest {
    pub id: FollowRequestId,
    pub sender_id: UserId,
    pub recipient_id: UserId,
    pub status: FollowStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FollowRequest {
    pub fn is_accepted(&self) -> bool {
        self.status == FollowStatus::Accepted
    }
}

/// Lifecycle of a follow request. Stored as lowercase text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl FollowStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            FollowStatus::Pending => "pending",
            FollowStatus::Accepted => "accepted",
            FollowStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for FollowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown follow status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for FollowStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(FollowStatus::Pending),
            "accepted" => Ok(FollowStatus::Accepted),
            "rejected" => Ok(FollowStatus::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_lowercase_names() {
        assert_eq!("accepted".parse(), Ok(FollowStatus::Accepted));
        assert_eq!("pending".parse(), Ok(FollowStatus::Pending));
        assert_eq!("rejected".parse(), Ok(FollowStatus::Rejected));
    }

    #[test]
    fn test_status_rejects_unknown_names() {
        let err = "Accepted".parse::<FollowStatus>().unwrap_err();
        assert_eq!(err, UnknownStatus("Accepted".to_string()));
    }

    #[test]
    fn test_status_serializes_as_stored_text() {
        let json = serde_json::to_string(&FollowStatus::Accepted).unwrap();
        assert_eq!(json, "\"accepted\"");
        assert_eq!(FollowStatus::Rejected.to_string(), "rejected");
    }
}
