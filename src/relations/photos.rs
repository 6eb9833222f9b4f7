// SPDX-License-Identifier: MPL-2.0

use crate::model::{Comment, Like, Photo, User};
use crate::relations::registry;
use crate::relations::resolve;
use crate::store::{Store, StoreError};

/// Associations reachable from a photo
pub struct PhotoRelations<'a> {
    db: &'a Store,
    photo: &'a Photo,
}

impl<'a> PhotoRelations<'a> {
    pub fn new(db: &'a Store, photo: &'a Photo) -> Self {
        Self { db, photo }
    }

    pub fn owner(&self) -> Result<Option<User>, StoreError> {
        resolve::belongs_to(&self.db.conn(), &registry::PHOTO_OWNER, self.photo.owner_id)
    }

    pub fn likes(&self) -> Result<Vec<Like>, StoreError> {
        resolve::has_many(&self.db.conn(), &registry::PHOTO_LIKES, self.photo.id)
    }

    pub fn comments(&self) -> Result<Vec<Comment>, StoreError> {
        resolve::has_many(&self.db.conn(), &registry::PHOTO_COMMENTS, self.photo.id)
    }

    /// Users who liked this photo
    pub fn fans(&self) -> Result<Vec<User>, StoreError> {
        resolve::through(&self.db.conn(), &registry::FANS, self.photo.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CommentStore, LikeStore, PhotoStore, UserStore};

    #[test]
    fn test_photo_associations() {
        let store = Store::open_in_memory().unwrap();
        let users = UserStore::new(&store);
        let owner = users.create("owner", false).unwrap();
        let fan1 = users.create("fan1", false).unwrap();
        let fan2 = users.create("fan2", false).unwrap();

        let photo = PhotoStore::new(&store).create(owner.id, None, "p.jpg").unwrap();
        let other = PhotoStore::new(&store).create(owner.id, None, "q.jpg").unwrap();

        let likes = LikeStore::new(&store);
        likes.create(fan2.id, photo.id).unwrap();
        likes.create(fan1.id, photo.id).unwrap();
        likes.create(fan1.id, other.id).unwrap();
        CommentStore::new(&store).create(fan1.id, photo.id, "wow").unwrap();

        let relations = PhotoRelations::new(&store, &photo);
        assert_eq!(relations.owner().unwrap().map(|u| u.id), Some(owner.id));
        assert_eq!(relations.likes().unwrap().len(), 2);
        assert_eq!(relations.comments().unwrap().len(), 1);

        let fans: Vec<i64> = relations.fans().unwrap().iter().map(|u| u.id).collect();
        assert_eq!(fans, vec![fan1.id, fan2.id]);
    }

    #[test]
    fn test_unliked_photo_has_no_fans() {
        let store = Store::open_in_memory().unwrap();
        let owner = UserStore::new(&store).create("owner", false).unwrap();
        let photo = PhotoStore::new(&store).create(owner.id, None, "p.jpg").unwrap();

        let relations = PhotoRelations::new(&store, &photo);
        assert!(relations.fans().unwrap().is_empty());
        assert!(relations.likes().unwrap().is_empty());
        assert!(relations.comments().unwrap().is_empty());
    }
}
