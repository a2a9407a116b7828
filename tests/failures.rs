use snapshare::app::{Action, AddPost, BookmarksPage, Homepage, Notice};
use snapshare::domain::PostDraft;
use snapshare::remote::Collection;

mod common;
use common::*;

#[test]
fn list_reads_degrade_to_empty() {
    let (client, store) = flaky_client();
    client.services.likes.like(&id("1"), &id("2")).unwrap();
    client.services.bookmarks.bookmark(&id("1"), &id("2")).unwrap();
    store.fail_lists(&Collection::ALL);

    assert!(client.services.posts.all_posts().is_empty());
    assert!(client.services.posts.posts_by_user(&id("1")).is_empty());
    assert!(client.services.likes.likes_for_post(&id("1")).is_empty());
    assert!(!client.services.likes.has_user_liked(&id("1"), &id("2")));
    assert!(client.services.bookmarks.bookmarks_for_user(&id("2")).is_empty());
    assert!(!client.services.bookmarks.has_user_bookmarked(&id("1"), &id("2")));
    assert!(client.services.posts.try_all_posts().is_err());
}

#[test]
fn homepage_shows_load_failure() {
    let (client, store) = flaky_client();
    store.fail_lists(&[Collection::Posts]);

    let mut home = Homepage::new(client.services.clone());
    home.load(None);

    let vm = home.compute_viewmodel(None);
    assert_eq!(vm.error.as_deref(), Some("Failed to load posts"));
    assert!(vm.cards.is_empty());
    assert!(!vm.loading);
}

#[test]
fn bookmarks_page_shows_load_failure() {
    let (mut client, store) = flaky_client();
    let ben = ben(&mut client);
    client.services.bookmarks.bookmark(&id("1"), &ben.id).unwrap();
    store.fail_lists(&[Collection::Posts]);

    let mut page = BookmarksPage::new(client.services.clone());
    page.load(Some(&ben));

    assert_eq!(page.feed().error(), Some("Failed to load bookmarked posts"));
    assert!(page.feed().cards().is_empty());
}

#[test]
fn failed_like_rolls_back() {
    let (mut client, store) = flaky_client();
    let ben = ben(&mut client);
    let mut home = Homepage::new(client.services.clone());
    home.load(Some(&ben));
    store.fail_writes(true);

    assert_eq!(
        home.toggle_like(&id("1"), Some(&ben)).unwrap(),
        vec![Action::Notify(Notice::error("Failed to update like"))]
    );
    let card = home.feed().card(&id("1")).unwrap();
    assert!(!card.liked);
    assert_eq!(card.likes_count, 0);
}

#[test]
fn failed_unbookmark_rolls_back() {
    let (mut client, store) = flaky_client();
    let ben = ben(&mut client);
    client.services.bookmarks.bookmark(&id("2"), &ben.id).unwrap();
    let mut home = Homepage::new(client.services.clone());
    home.load(Some(&ben));
    assert!(home.feed().card(&id("2")).unwrap().bookmarked);
    store.fail_writes(true);

    assert_eq!(
        home.toggle_bookmark(&id("2"), Some(&ben)).unwrap(),
        vec![Action::Notify(Notice::error("Failed to update bookmark"))]
    );
    assert!(home.feed().card(&id("2")).unwrap().bookmarked);

    store.heal();
    assert!(client.services.bookmarks.has_user_bookmarked(&id("2"), &ben.id));
}

#[test]
fn failed_delete_keeps_the_post() {
    let (mut client, store) = flaky_client();
    let ana = ana(&mut client);
    let mut home = Homepage::new(client.services.clone());
    home.load(Some(&ana));
    home.request_delete(&id("1"), Some(&ana)).unwrap();
    store.fail_writes(true);

    assert_eq!(
        home.confirm_delete(),
        vec![Action::Notify(Notice::error("Failed to delete post."))]
    );
    let vm = home.compute_viewmodel(Some(&ana));
    assert_eq!(vm.error.as_deref(), Some("Failed to delete post"));
    assert!(vm.confirm_delete.is_none());
    assert!(home.feed().card(&id("1")).is_some());

    store.heal();
    assert_eq!(client.services.posts.all_posts().len(), 3);
}

#[test]
fn failed_create_sets_the_banner() {
    let (mut client, store) = flaky_client();
    let ana = ana(&mut client);
    store.fail_writes(true);

    let mut page = AddPost::new(client.services.clone());
    page.form.draft = PostDraft {
        title: "Harbour Morning".to_string(),
        description: "Boats waiting for the tide".to_string(),
        image: "https://example.com/harbour.jpg".to_string(),
    };

    assert!(page.submit(Some(&ana)).is_empty());
    assert_eq!(page.form.error(), Some("Failed to create post. Please try again."));
}

#[test]
fn unlike_lands_even_if_the_legacy_lookup_fails() {
    let (client, store) = flaky_client();
    client.services.likes.like(&id("3"), &id("2")).unwrap();
    store.fail_lists(&[Collection::Likes]);

    client.services.likes.unlike(&id("3"), &id("2")).unwrap();

    store.heal();
    assert!(!client.services.likes.has_user_liked(&id("3"), &id("2")));
}
