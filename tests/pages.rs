use snapshare::app::{navbar, Action, BookmarksPage, Homepage, Notice, Route};
use snapshare::SnapshareError;

mod common;
use common::*;

#[test]
fn visitor_sees_every_post_without_relation_state() {
    let client = seeded_client();
    let mut home = Homepage::new(client.services.clone());
    home.load(None);

    let vm = home.compute_viewmodel(None);
    assert_eq!(vm.header.title, "Latest Posts");
    assert_eq!(vm.cards.len(), 3);
    assert!(!vm.show_add_button);
    assert!(vm.cards.iter().all(|c| !c.liked && !c.bookmarked && !c.can_edit && c.likes_count == 0));
}

#[test]
fn visitor_actions_prompt_login() {
    let client = seeded_client();
    let mut home = Homepage::new(client.services.clone());
    home.load(None);

    assert_eq!(home.toggle_like(&id("1"), None).unwrap(), vec![Action::PromptLogin]);
    assert_eq!(home.toggle_bookmark(&id("1"), None).unwrap(), vec![Action::PromptLogin]);
    assert_eq!(home.request_delete(&id("1"), None).unwrap(), vec![Action::PromptLogin]);
    assert!(client.services.likes.likes_for_post(&id("1")).is_empty());
}

#[test]
fn owner_sees_edit_controls_only_on_own_posts() {
    let mut client = seeded_client();
    let ana = ana(&mut client);
    let mut home = Homepage::new(client.services.clone());
    home.load(Some(&ana));

    let editable: Vec<String> = home
        .compute_viewmodel(Some(&ana))
        .cards
        .into_iter()
        .filter(|c| c.can_edit)
        .map(|c| c.title)
        .collect();
    assert_eq!(editable, ["City Lights", "Sunset Beach"]);

    assert_eq!(
        home.edit(&id("3"), Some(&ana)).unwrap(),
        vec![Action::Navigate(Route::EditPost(id("3")))]
    );
    assert!(matches!(home.edit(&id("2"), Some(&ana)), Err(SnapshareError::Forbidden(_))));
    assert!(matches!(home.request_delete(&id("2"), Some(&ana)), Err(SnapshareError::Forbidden(_))));
}

#[test]
fn like_toggle_updates_card_and_store() {
    let mut client = seeded_client();
    let ben = ben(&mut client);
    let mut home = Homepage::new(client.services.clone());
    home.load(Some(&ben));

    assert!(home.toggle_like(&id("1"), Some(&ben)).unwrap().is_empty());
    let card = home.feed().card(&id("1")).unwrap();
    assert!(card.liked);
    assert_eq!(card.likes_count, 1);
    assert!(client.services.likes.has_user_liked(&id("1"), &ben.id));

    home.toggle_like(&id("1"), Some(&ben)).unwrap();
    let card = home.feed().card(&id("1")).unwrap();
    assert!(!card.liked);
    assert_eq!(card.likes_count, 0);

    assert!(matches!(home.toggle_like(&id("77"), Some(&ben)), Err(SnapshareError::NotFound(_))));
}

#[test]
fn delete_is_confirmed_before_it_happens() {
    let mut client = seeded_client();
    let ana = ana(&mut client);
    let mut home = Homepage::new(client.services.clone());
    home.load(Some(&ana));

    home.request_delete(&id("1"), Some(&ana)).unwrap();
    let dialog = home.compute_viewmodel(Some(&ana)).confirm_delete.unwrap();
    assert_eq!(dialog.title, "Confirm Deletion");

    home.cancel_delete();
    assert!(home.compute_viewmodel(Some(&ana)).confirm_delete.is_none());
    assert!(home.confirm_delete().is_empty());
    assert_eq!(client.services.posts.all_posts().len(), 3);

    home.request_delete(&id("1"), Some(&ana)).unwrap();
    assert_eq!(
        home.confirm_delete(),
        vec![Action::Notify(Notice::success("Post deleted successfully!"))]
    );
    assert!(home.feed().card(&id("1")).is_none());
    assert_eq!(client.services.posts.all_posts().len(), 2);
}

#[test]
fn search_comes_from_the_location_query() {
    let client = seeded_client();
    let mut home = Homepage::new(client.services.clone());
    home.load(None);

    home.set_location_query("?search=golden+SEA");
    assert_eq!(home.search_query(), "golden SEA");
    let vm = home.compute_viewmodel(None);
    assert_eq!(vm.header.title, "Search Results for \"golden SEA\"");
    assert_eq!(vm.cards.len(), 1);
    assert_eq!(vm.cards[0].title, "Sunset Beach");

    home.set_search("volcano");
    let vm = home.compute_viewmodel(None);
    assert!(vm.cards.is_empty());
    assert_eq!(vm.empty_state.unwrap().message, "No posts found matching your search.");
}

#[test]
fn navbar_search_round_trips_through_the_route() {
    let actions = navbar::submit_search("city lights");
    let [Action::Navigate(route)] = actions.as_slice() else {
        panic!("expected one navigation, got {actions:?}");
    };
    assert_eq!(route.path(), "/?search=city+lights");

    let client = seeded_client();
    let mut home = Homepage::new(client.services.clone());
    home.load(None);
    home.set_location_query(route.path().trim_start_matches('/'));
    assert_eq!(home.visible().len(), 1);
}

#[test]
fn empty_store_shows_invitation() {
    let client = empty_client();
    let mut home = Homepage::new(client.services.clone());
    home.load(None);

    let vm = home.compute_viewmodel(None);
    assert!(vm.error.is_none());
    assert_eq!(vm.empty_state.unwrap().message, "No posts yet. Be the first to share a photo!");
}

#[test]
fn bookmarks_page_lists_only_bookmarked_posts() {
    let mut client = seeded_client();
    let ben = ben(&mut client);
    client.services.bookmarks.bookmark(&id("1"), &ben.id).unwrap();
    client.services.bookmarks.bookmark(&id("3"), &ben.id).unwrap();

    let mut page = BookmarksPage::new(client.services.clone());
    page.load(Some(&ben));

    let vm = page.compute_viewmodel(Some(&ben));
    assert_eq!(vm.header.title, "Your Bookmarks");
    let titles: Vec<&str> = vm.cards.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["City Lights", "Sunset Beach"]);
    assert!(vm.cards.iter().all(|c| c.bookmarked));
}

#[test]
fn unbookmarking_removes_the_card() {
    let mut client = seeded_client();
    let ben = ben(&mut client);
    client.services.bookmarks.bookmark(&id("1"), &ben.id).unwrap();

    let mut page = BookmarksPage::new(client.services.clone());
    page.load(Some(&ben));
    assert_eq!(page.feed().cards().len(), 1);

    page.remove_bookmark(&id("1"), Some(&ben)).unwrap();
    assert!(page.feed().cards().is_empty());
    assert!(!client.services.bookmarks.has_user_bookmarked(&id("1"), &ben.id));
    assert_eq!(
        page.compute_viewmodel(Some(&ben)).empty_state.unwrap().message,
        "No bookmarks yet. Start saving your favorite posts!"
    );
}

#[test]
fn bookmarks_of_deleted_posts_are_skipped() {
    let mut client = seeded_client();
    let ben = ben(&mut client);
    client.services.bookmarks.bookmark(&id("1"), &ben.id).unwrap();
    client.services.bookmarks.bookmark(&id("2"), &ben.id).unwrap();
    client.services.posts.delete_post(&id("1")).unwrap();

    let mut page = BookmarksPage::new(client.services.clone());
    page.load(Some(&ben));

    let ids: Vec<_> = page.feed().cards().iter().map(|c| c.post.id.clone()).collect();
    assert_eq!(ids, [id("2")]);
}

#[test]
fn bookmarks_page_without_viewer_stays_put() {
    let client = seeded_client();
    let mut page = BookmarksPage::new(client.services.clone());
    page.load(None);
    assert!(page.feed().is_loading());
    assert!(page.feed().cards().is_empty());
}

#[test]
fn menu_depends_on_session() {
    let mut client = seeded_client();
    let labels = |c: &snapshare::Client| -> Vec<&'static str> {
        navbar::menu_items(&c.session).into_iter().map(|i| i.label).collect()
    };
    assert_eq!(labels(&client), ["Home"]);

    ana(&mut client);
    assert_eq!(labels(&client), ["Home", "Bookmarks"]);
}
