//! Plain-text rendering of Flowerly data for tool responses

use std::fmt::Write;

use flowerly_client::domain::entities::{
    Avatar, Comment, FeedScope, Plant, Post, UserId, UserProfile,
};

/// One feed page. `first_index` is the 1-based position of `posts[0]` in
/// the whole feed.
pub fn feed_page(
    scope: &FeedScope,
    posts: &[Post],
    first_index: usize,
    has_more: bool,
    viewer: Option<&UserId>,
) -> String {
    let mut out = match scope {
        FeedScope::All => String::from("# Flowerly feed\n\n"),
        FeedScope::Owner(owner) => format!("# Posts by {}\n\n", owner),
    };

    if posts.is_empty() && first_index == 1 {
        out.push_str("No posts yet.\n");
        return out;
    }

    for (offset, post) in posts.iter().enumerate() {
        let _ = writeln!(out, "[{}] {}", first_index + offset, post_summary(post, viewer));
    }

    if has_more {
        out.push_str("More posts available: call feed_more.\n");
    } else {
        out.push_str("End of feed.\n");
    }
    out
}

fn post_summary(post: &Post, viewer: Option<&UserId>) -> String {
    let author = post.owner.username().unwrap_or(post.owner.id().as_ref());
    let liked = match viewer {
        Some(viewer) if post.is_liked_by(viewer) => " (you liked this)",
        _ => "",
    };
    format!(
        "{} by {} (id: {})\n    {}\n    {} likes{}, {} comments\n",
        post.plant_type,
        author,
        post.id,
        post.content,
        post.like_count(),
        liked,
        post.comments_count
    )
}

/// A single post with its comments. `comments` is `Err` with a message
/// when they could not be loaded.
pub fn post_detail(
    post: &Post,
    comments: Result<&[Comment], &str>,
    api_base_url: &str,
    viewer: Option<&UserId>,
) -> String {
    let mut out = post_summary(post, viewer);
    if let Some(url) = post.image_url(api_base_url) {
        let _ = writeln!(out, "    image: {}", url);
    }

    out.push_str("\n## Comments\n");
    match comments {
        Ok([]) => out.push_str("No comments yet.\n"),
        Ok(comments) => {
            for comment in comments {
                let _ = writeln!(out, "- {}: {}", comment.owner.username, comment.content);
            }
        }
        Err(message) => {
            let _ = writeln!(out, "{}", message);
        }
    }
    out
}

pub fn plants(plants: &[Plant]) -> String {
    if plants.is_empty() {
        return "No plants available.".to_string();
    }
    let mut out = String::from("# Plants\n\n");
    for plant in plants {
        let _ = write!(out, "- {} ({})", plant.name, plant.scientific_name);
        if let Some(family) = &plant.family_common_name {
            let _ = write!(out, ", {} family", family);
        }
        out.push('\n');
    }
    out
}

pub fn profile(profile: &UserProfile, avatar: &Avatar) -> String {
    let avatar = match avatar {
        Avatar::Url(url) => format!("picture: {}", url),
        Avatar::Initial(initial) => format!("no picture (shown as \"{}\")", initial),
    };
    format!(
        "# {}\n\nemail: {}\nid: {}\n{}\n",
        profile.user.username, profile.email, profile.user.id, avatar
    )
}
