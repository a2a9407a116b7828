//! Add-post and edit-post forms.
//!
//! Both forms validate locally before any request is made. Validation failures
//! are kept per field; request failures set the form's error banner.

use crate::app::actions::{Action, Notice, Route};
use crate::domain::error::{Result, SnapshareError};
use crate::domain::validation::{self, FieldErrors};
use crate::domain::{Id, Post, PostDraft, PostPatch, User};
use crate::services::Services;
use crate::ui::viewmodel::PostFormViewModel;

/// Field values, validation state and banner shared by both forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub draft: PostDraft,
    field_errors: FieldErrors,
    error: Option<String>,
}

impl PostForm {
    #[must_use]
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Image URL worth previewing: the entered one, once it parses.
    #[must_use]
    pub fn preview_url(&self) -> Option<&str> {
        let image = self.draft.image.trim();
        validation::is_valid_url(image).then_some(image)
    }

    /// Validates the draft, recording per-field messages.
    fn validate(&mut self) -> bool {
        self.error = None;
        match validation::validate_post(&self.draft) {
            Ok(()) => {
                self.field_errors = FieldErrors::default();
                true
            }
            Err(SnapshareError::Validation(errors)) => {
                tracing::debug!(%errors, "post form invalid");
                self.field_errors = errors;
                false
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }

    fn viewmodel(&self, heading: &str) -> PostFormViewModel {
        PostFormViewModel {
            heading: heading.to_string(),
            title: self.draft.title.clone(),
            description: self.draft.description.clone(),
            image: self.draft.image.clone(),
            field_errors: self
                .field_errors
                .iter()
                .map(|(field, message)| (field.to_string(), message.to_string()))
                .collect(),
            error: self.error.clone(),
            preview: self.preview_url().map(str::to_string),
        }
    }
}

/// Controller of the add-post page.
pub struct AddPost {
    services: Services,
    pub form: PostForm,
}

impl AddPost {
    #[must_use]
    pub fn new(services: Services) -> Self {
        Self {
            services,
            form: PostForm::default(),
        }
    }

    /// Validates and publishes the post.
    ///
    /// Without a viewer the form is left as is and the visitor is asked to log
    /// in. On success the page emits a notice and returns home.
    pub fn submit(&mut self, viewer: Option<&User>) -> Vec<Action> {
        let Some(author) = viewer else {
            return vec![Action::PromptLogin];
        };
        if !self.form.validate() {
            return Vec::new();
        }

        match self.services.posts.create_post(author, self.form.draft.clone()) {
            Ok(_) => vec![
                Action::Notify(Notice::success("Post added successfully!")),
                Action::Navigate(Route::Home),
            ],
            Err(_) => {
                self.form.error = Some("Failed to create post. Please try again.".to_string());
                Vec::new()
            }
        }
    }

    #[must_use]
    pub fn cancel(&self) -> Vec<Action> {
        vec![Action::Navigate(Route::Home)]
    }

    #[must_use]
    pub fn compute_viewmodel(&self) -> PostFormViewModel {
        self.form.viewmodel("Create New Post")
    }
}

/// Controller of the edit-post page.
pub struct EditPost {
    services: Services,
    post_id: Id,
    post: Option<Post>,
    loading: bool,
    pub form: PostForm,
}

impl EditPost {
    #[must_use]
    pub fn new(services: Services, post_id: Id) -> Self {
        Self {
            services,
            post_id,
            post: None,
            loading: true,
            form: PostForm::default(),
        }
    }

    /// Fetches the post and fills the form from it.
    ///
    /// A missing or unreachable post sets the `Failed to load post` banner.
    pub fn load(&mut self) {
        let _span = tracing::debug_span!("edit_post_load", post_id = %self.post_id).entered();
        self.loading = true;
        match self.services.posts.get_post(&self.post_id) {
            Ok(post) => {
                self.form = PostForm {
                    draft: PostDraft::from(&post),
                    ..PostForm::default()
                };
                self.post = Some(post);
            }
            Err(e) => {
                tracing::warn!(error = %e, "error loading post");
                self.form.error = Some("Failed to load post".to_string());
            }
        }
        self.loading = false;
    }

    #[must_use]
    pub const fn post(&self) -> Option<&Post> {
        self.post.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Validates and saves the changes, then returns home.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the post was never loaded and `Forbidden` if the
    /// viewer is not its author.
    pub fn submit(&mut self, viewer: Option<&User>) -> Result<Vec<Action>> {
        let Some(user) = viewer else {
            return Ok(vec![Action::PromptLogin]);
        };
        let post = self
            .post
            .as_ref()
            .ok_or_else(|| SnapshareError::NotFound(format!("post {}", self.post_id)))?;
        if !post.is_owned_by(user) {
            return Err(SnapshareError::Forbidden(format!("post {} belongs to another user", post.id)));
        }
        if !self.form.validate() {
            return Ok(Vec::new());
        }

        let patch = PostPatch::from(self.form.draft.clone());
        match self.services.posts.update_post(&self.post_id, patch) {
            Ok(updated) => {
                self.post = Some(updated);
                Ok(vec![Action::Navigate(Route::Home)])
            }
            Err(_) => {
                self.form.error = Some("Failed to update post".to_string());
                Ok(Vec::new())
            }
        }
    }

    #[must_use]
    pub fn cancel(&self) -> Vec<Action> {
        vec![Action::Navigate(Route::Home)]
    }

    #[must_use]
    pub fn compute_viewmodel(&self) -> PostFormViewModel {
        self.form.viewmodel("Edit Post")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Registration;
    use crate::remote::MemoryStore;
    use crate::storage::MemorySessionStore;
    use std::sync::Arc;

    fn services() -> Services {
        Services::new(Arc::new(MemoryStore::new()), Arc::new(MemorySessionStore::new()))
    }

    fn user(name: &str) -> User {
        Registration {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password: "secret1".to_string(),
        }
        .into_user()
    }

    fn valid_draft() -> PostDraft {
        PostDraft {
            title: "Sunset Beach".to_string(),
            description: "Golden hour by the sea".to_string(),
            image: "https://example.com/sunset.jpg".to_string(),
        }
    }

    #[test]
    fn add_requires_login_and_valid_fields() {
        let services = services();
        let ana = user("ana");
        let mut page = AddPost::new(services.clone());

        assert_eq!(page.submit(None), vec![Action::PromptLogin]);

        page.form.draft.title = "ab".to_string();
        assert!(page.submit(Some(&ana)).is_empty());
        assert_eq!(
            page.form.field_errors().get("title"),
            Some("Title must be at least 3 characters")
        );
        assert!(services.posts.all_posts().is_empty());
    }

    #[test]
    fn add_publishes_and_goes_home() {
        let services = services();
        let ana = user("ana");
        let mut page = AddPost::new(services.clone());
        page.form.draft = valid_draft();

        assert_eq!(page.compute_viewmodel().preview.as_deref(), Some("https://example.com/sunset.jpg"));
        let actions = page.submit(Some(&ana));
        assert_eq!(
            actions,
            vec![
                Action::Notify(Notice::success("Post added successfully!")),
                Action::Navigate(Route::Home),
            ]
        );
        let posts = services.posts.all_posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].user_id, ana.id);
        assert_eq!(posts[0].username, "ana");
    }

    #[test]
    fn edit_loads_form_and_rejects_other_users() {
        let services = services();
        let ana = user("ana");
        let bob = user("bob");
        let post = services.posts.create_post(&ana, valid_draft()).unwrap();

        let mut page = EditPost::new(services.clone(), post.id.clone());
        page.load();
        assert_eq!(page.form.draft.title, "Sunset Beach");

        assert!(matches!(page.submit(Some(&bob)), Err(SnapshareError::Forbidden(_))));

        page.form.draft.title = "Sunrise Beach".to_string();
        assert_eq!(page.submit(Some(&ana)).unwrap(), vec![Action::Navigate(Route::Home)]);
        assert_eq!(services.posts.get_post(&post.id).unwrap().title, "Sunrise Beach");
    }

    #[test]
    fn edit_of_missing_post_sets_banner() {
        let mut page = EditPost::new(services(), Id::from("missing"));
        page.load();
        assert!(page.post().is_none());
        assert_eq!(page.form.error(), Some("Failed to load post"));
        assert!(!page.is_loading());
    }
}
