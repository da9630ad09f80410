//! Read/write eligibility rules for posts and comments.
//!
//! Every rule is a pure function over explicit inputs (viewer, entity,
//! current time) so the policy is testable without a database. Handlers
//! and repositories apply the same predicates; repositories push them into
//! query filters, handlers evaluate them per entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Comment, Post};

/// The identity a request is evaluated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    User(Uuid),
}

impl Viewer {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User(id) => Some(*id),
        }
    }

    /// Whether this viewer is the given user.
    pub fn is(&self, user_id: Uuid) -> bool {
        matches!(self, Viewer::User(id) if *id == user_id)
    }
}

impl From<Option<Uuid>> for Viewer {
    fn from(id: Option<Uuid>) -> Self {
        match id {
            Some(id) => Viewer::User(id),
            None => Viewer::Anonymous,
        }
    }
}

/// The publish gate: is the post readable by the general public at `now`?
///
/// `category` must be the post's owning category when it has one. A post
/// with no category is gated on its own flags alone.
pub fn post_is_public(post: &Post, category: Option<&Category>, now: DateTime<Utc>) -> bool {
    post.is_published
        && post.pub_date <= now
        && category.map(|c| c.is_published).unwrap_or(true)
}

/// Whether `viewer` may read `post`. Authors bypass the publish gate.
pub fn can_view_post(
    viewer: Viewer,
    post: &Post,
    category: Option<&Category>,
    now: DateTime<Utc>,
) -> bool {
    viewer.is(post.author_id) || post_is_public(post, category, now)
}

/// Whether `viewer` may edit or delete `post`. Authorship is the sole rule.
pub fn can_modify_post(viewer: Viewer, post: &Post) -> bool {
    viewer.is(post.author_id)
}

/// Whether `viewer` may edit or delete `comment`.
pub fn can_modify_comment(viewer: Viewer, comment: &Comment) -> bool {
    viewer.is(comment.author_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn sample_post(author_id: Uuid, now: DateTime<Utc>) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id,
            category_id: None,
            location_id: None,
            title: "Title".to_owned(),
            body: "Body".to_owned(),
            pub_date: now - TimeDelta::hours(1),
            is_published: true,
            created_at: now - TimeDelta::hours(2),
        }
    }

    fn sample_category(is_published: bool) -> Category {
        Category {
            id: Uuid::new_v4(),
            title: "Travel".to_owned(),
            description: "On the road".to_owned(),
            slug: "travel".to_owned(),
            is_published,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn author_sees_own_post_regardless_of_publish_state() {
        let now = Utc::now();
        let author = Uuid::new_v4();
        let mut post = sample_post(author, now);
        post.is_published = false;
        post.pub_date = now + TimeDelta::days(7);
        let hidden_category = sample_category(false);

        assert!(can_view_post(
            Viewer::User(author),
            &post,
            Some(&hidden_category),
            now
        ));
    }

    #[test]
    fn unpublished_post_hidden_from_others() {
        let now = Utc::now();
        let mut post = sample_post(Uuid::new_v4(), now);
        post.is_published = false;

        assert!(!can_view_post(Viewer::Anonymous, &post, None, now));
        assert!(!can_view_post(Viewer::User(Uuid::new_v4()), &post, None, now));
    }

    #[test]
    fn future_post_hidden_from_others() {
        let now = Utc::now();
        let mut post = sample_post(Uuid::new_v4(), now);
        post.pub_date = now + TimeDelta::minutes(1);

        assert!(!can_view_post(Viewer::Anonymous, &post, None, now));
    }

    #[test]
    fn unpublished_category_hides_published_post() {
        let now = Utc::now();
        let post = sample_post(Uuid::new_v4(), now);
        let category = sample_category(false);

        assert!(post_is_public(&post, None, now));
        assert!(!can_view_post(Viewer::Anonymous, &post, Some(&category), now));
    }

    #[test]
    fn published_post_in_published_category_is_public() {
        let now = Utc::now();
        let post = sample_post(Uuid::new_v4(), now);
        let category = sample_category(true);

        assert!(can_view_post(Viewer::Anonymous, &post, Some(&category), now));
    }

    #[test]
    fn post_without_category_gated_on_own_flags() {
        let now = Utc::now();
        let post = sample_post(Uuid::new_v4(), now);

        assert!(can_view_post(Viewer::Anonymous, &post, None, now));
    }

    #[test]
    fn only_author_may_modify_post() {
        let now = Utc::now();
        let author = Uuid::new_v4();
        let post = sample_post(author, now);

        assert!(can_modify_post(Viewer::User(author), &post));
        assert!(!can_modify_post(Viewer::User(Uuid::new_v4()), &post));
        assert!(!can_modify_post(Viewer::Anonymous, &post));
    }

    #[test]
    fn only_author_may_modify_comment() {
        let author = Uuid::new_v4();
        let comment = Comment::new(Uuid::new_v4(), author, "Nice one".to_owned());

        assert!(can_modify_comment(Viewer::User(author), &comment));
        assert!(!can_modify_comment(Viewer::User(Uuid::new_v4()), &comment));
        assert!(!can_modify_comment(Viewer::Anonymous, &comment));
    }
}
