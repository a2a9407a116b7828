//! Post search: the `search` query parameter and the filter it drives.
//!
//! A term is split on whitespace into lowercase tokens. A post matches when
//! every token occurs as a substring of its title or its description. An empty
//! or blank term matches everything.

use crate::app::actions::Route;
use crate::domain::Post;
use url::form_urlencoded;

/// Extracts the `search` parameter from a location query string.
///
/// Accepts the string with or without its leading `?`. Missing parameter
/// yields an empty term.
///
/// ```
/// use snapshare::app::search::term_from_query;
///
/// assert_eq!(term_from_query("?search=sun%20beach"), "sun beach");
/// assert_eq!(term_from_query("page=2"), "");
/// ```
#[must_use]
pub fn term_from_query(query: &str) -> String {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "search")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

/// Route for submitting a search from the navigation bar.
#[must_use]
pub fn search_route(term: &str) -> Route {
    if term.trim().is_empty() {
        Route::Home
    } else {
        Route::HomeSearch(term.to_string())
    }
}

/// Lowercase whitespace-separated tokens of a search term.
#[must_use]
pub fn tokenize(term: &str) -> Vec<String> {
    term.split_whitespace().map(str::to_lowercase).collect()
}

/// Whether `post` contains every token in its title or description.
#[must_use]
pub fn matches(post: &Post, tokens: &[String]) -> bool {
    let title = post.title.to_lowercase();
    let description = post.description.to_lowercase();
    tokens
        .iter()
        .all(|token| title.contains(token.as_str()) || description.contains(token.as_str()))
}

/// Filters `items` by `term`, keeping their order.
///
/// `post_of` projects each item to the post it shows, so the same filter works
/// over bare posts and over card state.
pub fn filter_by<'a, T>(items: &'a [T], term: &str, post_of: impl Fn(&T) -> &Post) -> Vec<&'a T> {
    let tokens = tokenize(term);
    if tokens.is_empty() {
        return items.iter().collect();
    }

    let filtered: Vec<&T> = items.iter().filter(|&item| matches(post_of(item), &tokens)).collect();
    tracing::debug!(tokens = tokens.len(), filtered_count = filtered.len(), "search filter applied");
    filtered
}

/// Filters posts by `term`.
#[must_use]
pub fn filter_posts<'a>(posts: &'a [Post], term: &str) -> Vec<&'a Post> {
    filter_by(posts, term, |post| post)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Id, PostDraft, Registration};

    fn post(title: &str, description: &str) -> Post {
        let author = Registration {
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
        }
        .into_user();
        PostDraft {
            title: title.to_string(),
            description: description.to_string(),
            image: "https://example.com/p.jpg".to_string(),
        }
        .into_post(&author)
    }

    fn titles<'a>(posts: &[&'a Post]) -> Vec<&'a str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn single_token_is_case_insensitive() {
        let posts = vec![
            post("Sunset Beach", "Golden hour by the sea"),
            post("Mountain Hike", "Trail to the summit"),
        ];
        assert_eq!(titles(&filter_posts(&posts, "beach")), vec!["Sunset Beach"]);
        assert_eq!(titles(&filter_posts(&posts, "BEACH")), vec!["Sunset Beach"]);
    }

    #[test]
    fn every_token_must_match_title_or_description() {
        let posts = vec![
            post("Sunset Beach", "Golden hour by the sea"),
            post("Beach volleyball", "Afternoon game"),
            post("Sunny meadow", "Wildflowers and a beach towel"),
        ];
        assert_eq!(
            titles(&filter_posts(&posts, "sun beach")),
            vec!["Sunset Beach", "Sunny meadow"]
        );
        assert!(filter_posts(&posts, "sun volleyball").is_empty());
    }

    #[test]
    fn blank_term_keeps_everything() {
        let posts = vec![post("Sunset Beach", "Golden hour by the sea")];
        assert_eq!(filter_posts(&posts, "   ").len(), 1);
        assert_eq!(filter_posts(&posts, "").len(), 1);
    }

    #[test]
    fn query_string_and_routes() {
        assert_eq!(term_from_query("search=sun+beach&x=1"), "sun beach");
        assert_eq!(search_route("  "), Route::Home);
        assert_eq!(search_route("beach"), Route::HomeSearch("beach".to_string()));
        assert_eq!(Route::EditPost(Id::from("42")).path(), "/edit-post/42");
    }
}
