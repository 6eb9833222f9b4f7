// SPDX-License-Identifier: MPL-2.0

use crate::model::{Comment, FollowRequest, Like, Photo, User, UserId};
use crate::relations::registry::{self, HasMany, Through};
use crate::relations::resolve;
use crate::store::{Record, Store, StoreError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Associations reachable from a user
pub struct UserRelations<'a> {
    db: &'a Store,
    user_id: UserId,
}

impl<'a> UserRelations<'a> {
    pub fn new(db: &'a Store, user_id: UserId) -> Self {
        Self { db, user_id }
    }

    pub fn of(db: &'a Store, user: &User) -> Self {
        Self::new(db, user.id)
    }

    fn has_many<R: Record>(&self, assoc: &HasMany) -> Result<Vec<R>, StoreError> {
        resolve::has_many(&self.db.conn(), assoc, self.user_id)
    }

    fn through<R: Record>(&self, assoc: &Through) -> Result<Vec<R>, StoreError> {
        resolve::through(&self.db.conn(), assoc, self.user_id)
    }

    /// Comments this user wrote
    pub fn comments(&self) -> Result<Vec<Comment>, StoreError> {
        self.has_many(&registry::COMMENTS)
    }

    /// Photos this user owns
    pub fn own_photos(&self) -> Result<Vec<Photo>, StoreError> {
        self.has_many(&registry::OWN_PHOTOS)
    }

    /// Likes this user gave as a fan
    pub fn likes(&self) -> Result<Vec<Like>, StoreError> {
        self.has_many(&registry::LIKES)
    }

    pub fn sent_follow_requests(&self) -> Result<Vec<FollowRequest>, StoreError> {
        self.has_many(&registry::SENT_FOLLOW_REQUESTS)
    }

    pub fn received_follow_requests(&self) -> Result<Vec<FollowRequest>, StoreError> {
        self.has_many(&registry::RECEIVED_FOLLOW_REQUESTS)
    }

    pub fn accepted_sent_follow_requests(&self) -> Result<Vec<FollowRequest>, StoreError> {
        self.has_many(&registry::ACCEPTED_SENT_FOLLOW_REQUESTS)
    }

    pub fn accepted_received_follow_requests(&self) -> Result<Vec<FollowRequest>, StoreError> {
        self.has_many(&registry::ACCEPTED_RECEIVED_FOLLOW_REQUESTS)
    }

    /// Photos this user liked
    pub fn liked_photos(&self) -> Result<Vec<Photo>, StoreError> {
        self.through(&registry::LIKED_PHOTOS)
    }

    /// Photos this user commented on, each listed once
    pub fn commented_photos(&self) -> Result<Vec<Photo>, StoreError> {
        self.through(&registry::COMMENTED_PHOTOS)
    }

    /// Senders of accepted follow requests to this user
    pub fn followers(&self) -> Result<Vec<User>, StoreError> {
        self.through(&registry::FOLLOWERS)
    }

    /// Recipients of accepted follow requests from this user
    pub fn leaders(&self) -> Result<Vec<User>, StoreError> {
        self.through(&registry::LEADERS)
    }

    /// Photos owned by this user's leaders
    pub fn feed(&self) -> Result<Vec<Photo>, StoreError> {
        resolve::composed(&self.db.conn(), &registry::FEED, self.user_id)
    }

    /// Photos liked by this user's leaders
    pub fn discover(&self) -> Result<Vec<Photo>, StoreError> {
        resolve::composed(&self.db.conn(), &registry::DISCOVER, self.user_id)
    }

    /// Resolve a view chosen at runtime
    pub fn view(&self, view: UserView) -> Result<ViewRows, StoreError> {
        Ok(match view {
            UserView::Comments => ViewRows::Comments(self.comments()?),
            UserView::OwnPhotos => ViewRows::Photos(self.own_photos()?),
            UserView::Likes => ViewRows::Likes(self.likes()?),
            UserView::SentFollowRequests => ViewRows::FollowRequests(self.sent_follow_requests()?),
            UserView::ReceivedFollowRequests => {
                ViewRows::FollowRequests(self.received_follow_requests()?)
            }
            UserView::AcceptedSentFollowRequests => {
                ViewRows::FollowRequests(self.accepted_sent_follow_requests()?)
            }
            UserView::AcceptedReceivedFollowRequests => {
                ViewRows::FollowRequests(self.accepted_received_follow_requests()?)
            }
            UserView::LikedPhotos => ViewRows::Photos(self.liked_photos()?),
            UserView::CommentedPhotos => ViewRows::Photos(self.commented_photos()?),
            UserView::Followers => ViewRows::Users(self.followers()?),
            UserView::Leaders => ViewRows::Users(self.leaders()?),
            UserView::Feed => ViewRows::Photos(self.feed()?),
            UserView::Discover => ViewRows::Photos(self.discover()?),
        })
    }
}

/// Every association a user exposes, by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserView {
    Comments,
    OwnPhotos,
    Likes,
    SentFollowRequests,
    ReceivedFollowRequests,
    AcceptedSentFollowRequests,
    AcceptedReceivedFollowRequests,
    LikedPhotos,
    CommentedPhotos,
    Followers,
    Leaders,
    Feed,
    Discover,
}

impl UserView {
    pub const ALL: &'static [UserView] = &[
        UserView::Comments,
        UserView::OwnPhotos,
        UserView::Likes,
        UserView::SentFollowRequests,
        UserView::ReceivedFollowRequests,
        UserView::AcceptedSentFollowRequests,
        UserView::AcceptedReceivedFollowRequests,
        UserView::LikedPhotos,
        UserView::CommentedPhotos,
        UserView::Followers,
        UserView::Leaders,
        UserView::Feed,
        UserView::Discover,
    ];

    /// Association name, as listed in the registry
    pub const fn name(self) -> &'static str {
        match self {
            UserView::Comments => registry::COMMENTS.name,
            UserView::OwnPhotos => registry::OWN_PHOTOS.name,
            UserView::Likes => registry::LIKES.name,
            UserView::SentFollowRequests => registry::SENT_FOLLOW_REQUESTS.name,
            UserView::ReceivedFollowRequests => registry::RECEIVED_FOLLOW_REQUESTS.name,
            UserView::AcceptedSentFollowRequests => registry::ACCEPTED_SENT_FOLLOW_REQUESTS.name,
            UserView::AcceptedReceivedFollowRequests => {
                registry::ACCEPTED_RECEIVED_FOLLOW_REQUESTS.name
            }
            UserView::LikedPhotos => registry::LIKED_PHOTOS.name,
            UserView::CommentedPhotos => registry::COMMENTED_PHOTOS.name,
            UserView::Followers => registry::FOLLOWERS.name,
            UserView::Leaders => registry::LEADERS.name,
            UserView::Feed => registry::FEED.name,
            UserView::Discover => registry::DISCOVER.name,
        }
    }
}

impl fmt::Display for UserView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view: {0}")]
pub struct UnknownView(pub String);

impl FromStr for UserView {
    type Err = UnknownView;

    /// Accepts the association name with either `_` or `-` separators
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        UserView::ALL
            .iter()
            .copied()
            .find(|view| view.name() == normalized)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

/// Rows of a runtime-selected view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ViewRows {
    Users(Vec<User>),
    Photos(Vec<Photo>),
    Likes(Vec<Like>),
    Comments(Vec<Comment>),
    FollowRequests(Vec<FollowRequest>),
}

impl ViewRows {
    pub fn len(&self) -> usize {
        match self {
            ViewRows::Users(rows) => rows.len(),
            ViewRows::Photos(rows) => rows.len(),
            ViewRows::Likes(rows) => rows.len(),
            ViewRows::Comments(rows) => rows.len(),
            ViewRows::FollowRequests(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FollowStatus;
    use crate::store::{CommentStore, FollowRequestStore, LikeStore, PhotoStore, UserStore};
    use rstest::{fixture, rstest};
    use std::collections::BTreeSet;

    /// A follows B and C, and has a pending request to D.
    /// B owns P1, C owns P2, D owns P3 and P4. C liked P3; B liked P3 and P1.
    /// E follows A.
    struct Graph {
        store: Store,
        a: User,
        b: User,
        c: User,
        d: User,
        e: User,
        p1: Photo,
        p2: Photo,
        p3: Photo,
        p4: Photo,
    }

    fn ids<T, F: Fn(&T) -> i64>(rows: &[T], id: F) -> BTreeSet<i64> {
        rows.iter().map(id).collect()
    }

    #[fixture]
    fn graph() -> Graph {
        let store = Store::open_in_memory().unwrap();
        let users = UserStore::new(&store);
        let a = users.create("a", false).unwrap();
        let b = users.create("b", false).unwrap();
        let c = users.create("c", true).unwrap();
        let d = users.create("d", false).unwrap();
        let e = users.create("e", false).unwrap();

        let photos = PhotoStore::new(&store);
        let p1 = photos.create(b.id, Some("one"), "p1.jpg").unwrap();
        let p2 = photos.create(c.id, Some("two"), "p2.jpg").unwrap();
        let p3 = photos.create(d.id, None, "p3.jpg").unwrap();
        let p4 = photos.create(d.id, None, "p4.jpg").unwrap();

        let requests = FollowRequestStore::new(&store);
        requests.create(a.id, b.id, FollowStatus::Accepted).unwrap();
        requests.create(a.id, c.id, FollowStatus::Accepted).unwrap();
        requests.create(a.id, d.id, FollowStatus::Pending).unwrap();
        requests.create(e.id, a.id, FollowStatus::Accepted).unwrap();
        requests.create(d.id, a.id, FollowStatus::Rejected).unwrap();

        let likes = LikeStore::new(&store);
        likes.create(c.id, p3.id).unwrap();
        likes.create(b.id, p3.id).unwrap();
        likes.create(b.id, p1.id).unwrap();

        Graph {
            store,
            a,
            b,
            c,
            d,
            e,
            p1,
            p2,
            p3,
            p4,
        }
    }

    #[rstest]
    fn test_feed_is_leaders_own_photos(graph: Graph) {
        let feed = UserRelations::of(&graph.store, &graph.a).feed().unwrap();
        assert_eq!(feed, vec![graph.p1.clone(), graph.p2.clone()]);
    }

    #[rstest]
    fn test_discover_is_leaders_liked_photos_once(graph: Graph) {
        let discover = UserRelations::of(&graph.store, &graph.a).discover().unwrap();

        // P3 is liked by both leaders but listed once
        assert_eq!(discover, vec![graph.p1.clone(), graph.p3.clone()]);
        assert!(!discover.contains(&graph.p4));
    }

    #[rstest]
    fn test_pending_request_is_not_a_leader(graph: Graph) {
        let relations = UserRelations::of(&graph.store, &graph.a);
        let leaders = relations.leaders().unwrap();

        assert_eq!(ids(&leaders, |u| u.id), BTreeSet::from([graph.b.id, graph.c.id]));
        assert!(!leaders.iter().any(|u| u.id == graph.d.id));
        assert_eq!(relations.sent_follow_requests().unwrap().len(), 3);
        assert_eq!(relations.accepted_sent_follow_requests().unwrap().len(), 2);
    }

    #[rstest]
    fn test_followers_are_accepted_senders(graph: Graph) {
        let relations = UserRelations::of(&graph.store, &graph.a);

        let followers = relations.followers().unwrap();
        assert_eq!(followers, vec![graph.e.clone()]);

        let received = relations.received_follow_requests().unwrap();
        assert_eq!(received.len(), 2);
        let accepted = relations.accepted_received_follow_requests().unwrap();
        assert!(accepted.iter().all(|r| r.is_accepted() && r.recipient_id == graph.a.id));
        assert_eq!(accepted.len(), 1);
    }

    #[rstest]
    fn test_followers_and_leaders_mirror_each_other(graph: Graph) {
        for user in [&graph.a, &graph.b, &graph.c, &graph.d, &graph.e] {
            for leader in UserRelations::of(&graph.store, user).leaders().unwrap() {
                let followers = UserRelations::of(&graph.store, &leader).followers().unwrap();
                assert!(followers.iter().any(|f| f.id == user.id));
            }
        }
    }

    #[rstest]
    fn test_liked_photos_match_like_rows(graph: Graph) {
        let relations = UserRelations::of(&graph.store, &graph.b);
        let liked = relations.liked_photos().unwrap();
        let likes = relations.likes().unwrap();

        assert_eq!(liked.len(), likes.len());
        assert_eq!(
            ids(&liked, |p| p.id),
            ids(&likes, |l| l.photo_id)
        );
    }

    #[rstest]
    fn test_commented_photos_are_distinct(graph: Graph) {
        let comments = CommentStore::new(&graph.store);
        for body in ["first", "second", "third"] {
            comments.create(graph.a.id, graph.p2.id, body).unwrap();
        }
        comments.create(graph.a.id, graph.p4.id, "also").unwrap();

        let relations = UserRelations::of(&graph.store, &graph.a);
        assert_eq!(relations.comments().unwrap().len(), 4);
        assert_eq!(
            relations.commented_photos().unwrap(),
            vec![graph.p2.clone(), graph.p4.clone()]
        );
    }

    #[rstest]
    fn test_own_photos(graph: Graph) {
        let own = UserRelations::of(&graph.store, &graph.d).own_photos().unwrap();
        assert_eq!(own, vec![graph.p3.clone(), graph.p4.clone()]);
    }

    #[rstest]
    fn test_accepting_a_request_extends_feed(graph: Graph) {
        let relations = UserRelations::of(&graph.store, &graph.a);
        let pending = relations
            .sent_follow_requests()
            .unwrap()
            .into_iter()
            .find(|r| r.recipient_id == graph.d.id)
            .unwrap();

        FollowRequestStore::new(&graph.store).accept(pending.id).unwrap();

        let feed = relations.feed().unwrap();
        assert_eq!(feed.len(), 4);
        assert!(feed.contains(&graph.p3) && feed.contains(&graph.p4));
    }

    #[rstest]
    fn test_user_without_rows_gets_empty_views(graph: Graph) {
        let loner = UserStore::new(&graph.store).create("loner", false).unwrap();
        let relations = UserRelations::of(&graph.store, &loner);

        for view in UserView::ALL {
            assert!(relations.view(*view).unwrap().is_empty(), "{view} not empty");
        }
    }

    #[rstest]
    fn test_unknown_user_gets_empty_views(graph: Graph) {
        let relations = UserRelations::new(&graph.store, 12_345);
        for view in UserView::ALL {
            assert!(relations.view(*view).unwrap().is_empty(), "{view} not empty");
        }
    }

    /// More rows than SQLite accepts bound variables in one statement
    const BULK_PHOTOS: i64 = 40_000;

    fn bulk_photos_liked_by(store: &Store, owner: &User, fan: &User) {
        let conn = store.conn();
        let now = Store::now();
        conn.execute(
            r#"
            WITH RECURSIVE n(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM n WHERE i < ?1)
            INSERT INTO photos (owner_id, image, created_at, updated_at)
            SELECT ?2, 'bulk-' || i || '.jpg', ?3, ?3 FROM n
            "#,
            rusqlite::params![BULK_PHOTOS, owner.id, now],
        )
        .unwrap();
        conn.execute(
            r#"
            INSERT INTO likes (fan_id, photo_id, created_at, updated_at)
            SELECT ?1, id, ?2, ?2 FROM photos WHERE owner_id = ?3
            "#,
            rusqlite::params![fan.id, now, owner.id],
        )
        .unwrap();
    }

    #[rstest]
    fn test_views_past_sqlite_variable_limit(graph: Graph) {
        let bulk = UserStore::new(&graph.store).create("bulk", false).unwrap();
        // C is one of A's leaders
        bulk_photos_liked_by(&graph.store, &bulk, &graph.c);

        let leader = UserRelations::of(&graph.store, &graph.c);
        let likes = leader.likes().unwrap();
        let liked = leader.liked_photos().unwrap();
        assert_eq!(likes.len() as i64, BULK_PHOTOS + 1);
        assert_eq!(liked.len(), likes.len());
        assert!(liked.windows(2).all(|w| w[0].id < w[1].id));

        let discover = UserRelations::of(&graph.store, &graph.a).discover().unwrap();
        // Bulk photos plus P1 (liked by B) and P3 (liked by B and C)
        assert_eq!(discover.len() as i64, BULK_PHOTOS + 2);

        FollowRequestStore::new(&graph.store)
            .create(graph.e.id, bulk.id, FollowStatus::Accepted)
            .unwrap();
        let feed = UserRelations::of(&graph.store, &graph.e).feed().unwrap();
        assert_eq!(feed.len() as i64, BULK_PHOTOS);
    }

    #[rstest]
    #[case("feed", UserView::Feed)]
    #[case("own-photos", UserView::OwnPhotos)]
    #[case("accepted_received_follow_requests", UserView::AcceptedReceivedFollowRequests)]
    fn test_view_names_parse(#[case] name: &str, #[case] expected: UserView) {
        assert_eq!(name.parse::<UserView>(), Ok(expected));
    }

    #[test]
    fn test_unknown_view_name_is_rejected() {
        assert_eq!(
            "timeline".parse::<UserView>(),
            Err(UnknownView("timeline".to_string()))
        );
    }

    #[test]
    fn test_view_names_round_trip() {
        for view in UserView::ALL {
            assert_eq!(view.name().parse::<UserView>(), Ok(*view));
        }
    }
}
