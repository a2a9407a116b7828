//! Plain-text rendering of view models.
//!
//! The renderer turns view models into the text the CLI prints. It never
//! touches controllers or services: everything it shows is already in the
//! view model.
//!
//! # Layout
//!
//! ```text
//! == Latest Posts ==
//!
//! [<id>] Sunset Beach
//!   by ana on Mar 5, 2024 · 3 likes · liked · bookmarked · yours
//!   Golden hour by the sea
//!   https://example.com/sunset.jpg
//! ```

use crate::app::{Notice, NoticeLevel};
use crate::ui::viewmodel::{CardView, FeedViewModel, PostFormViewModel};
use std::fmt::Write as _;

/// Renders a list page.
#[must_use]
pub fn render_feed(vm: &FeedViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", vm.header.title);

    if let Some(error) = &vm.error {
        let _ = writeln!(out, "! {error}");
    }
    if vm.loading {
        let _ = writeln!(out, "Loading...");
        return out;
    }
    if let Some(empty) = &vm.empty_state {
        let _ = writeln!(out, "\n{}", empty.message);
    }
    for card in &vm.cards {
        out.push('\n');
        render_card(&mut out, card);
    }
    if let Some(dialog) = &vm.confirm_delete {
        let _ = writeln!(out, "\n{}: {}", dialog.title, dialog.message);
    }
    out
}

fn render_card(out: &mut String, card: &CardView) {
    let _ = writeln!(out, "[{}] {}", card.id, card.title);

    let mut meta = vec![
        format!("by {} on {}", card.author, card.date),
        match card.likes_count {
            1 => "1 like".to_string(),
            n => format!("{n} likes"),
        },
    ];
    if card.liked {
        meta.push("liked".to_string());
    }
    if card.bookmarked {
        meta.push("bookmarked".to_string());
    }
    if card.can_edit {
        meta.push("yours".to_string());
    }
    let _ = writeln!(out, "  {}", meta.join(" · "));
    let _ = writeln!(out, "  {}", card.description);
    let _ = writeln!(out, "  {}", card.image);
}

/// Renders an add or edit form with its messages.
#[must_use]
pub fn render_form(vm: &PostFormViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", vm.heading);
    if let Some(error) = &vm.error {
        let _ = writeln!(out, "! {error}");
    }
    let _ = writeln!(out, "title:       {}", vm.title);
    let _ = writeln!(out, "description: {}", vm.description);
    let _ = writeln!(out, "image:       {}", vm.image);
    for (field, message) in &vm.field_errors {
        let _ = writeln!(out, "  {field}: {message}");
    }
    out
}

/// One-line rendering of a notification.
#[must_use]
pub fn render_notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!("✓ {}", notice.message),
        NoticeLevel::Error => format!("✗ {}", notice.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::{ConfirmDialog, EmptyState, HeaderInfo};

    fn card() -> CardView {
        CardView {
            id: "p1".to_string(),
            title: "Sunset Beach".to_string(),
            description: "Golden hour by the sea".to_string(),
            image: "https://example.com/sunset.jpg".to_string(),
            author: "ana".to_string(),
            date: "Mar 5, 2024".to_string(),
            likes_count: 1,
            liked: true,
            bookmarked: false,
            can_edit: true,
        }
    }

    fn feed(cards: Vec<CardView>) -> FeedViewModel {
        FeedViewModel {
            header: HeaderInfo {
                title: "Latest Posts".to_string(),
            },
            cards,
            empty_state: None,
            error: None,
            loading: false,
            show_add_button: false,
            confirm_delete: None,
        }
    }

    #[test]
    fn renders_cards_with_metadata() {
        let text = render_feed(&feed(vec![card()]));
        assert!(text.starts_with("== Latest Posts ==\n"));
        assert!(text.contains("[p1] Sunset Beach"));
        assert!(text.contains("by ana on Mar 5, 2024 · 1 like · liked · yours"));
    }

    #[test]
    fn renders_empty_state_and_prompt() {
        let mut vm = feed(vec![]);
        vm.empty_state = Some(EmptyState {
            message: "No posts yet. Be the first to share a photo!".to_string(),
        });
        vm.confirm_delete = Some(ConfirmDialog::delete_post("p1"));

        let text = render_feed(&vm);
        assert!(text.contains("No posts yet. Be the first to share a photo!"));
        assert!(text.contains("Confirm Deletion: Are you sure"));
    }

    #[test]
    fn notices_are_prefixed_by_level() {
        assert_eq!(render_notice(&Notice::success("Saved")), "✓ Saved");
        assert_eq!(render_notice(&Notice::error("Nope")), "✗ Nope");
    }
}
