//! `snapshare` command-line front end.
//!
//! Each subcommand drives one page controller the way a user would in the web
//! client, then prints the resulting page and carries out the returned
//! actions: notices are printed, navigation is logged, and a login prompt
//! becomes an error.

use clap::{Args, Parser, Subcommand};
use snapshare::app::{AddPost, BookmarksPage, EditPost, Homepage, Login, PostCard, Signup};
use snapshare::app::{navbar, Action, NoticeLevel};
use snapshare::domain::{FieldErrors, Id, SignupForm};
use snapshare::ui::viewmodel::{CardView, EmptyState, FeedViewModel, HeaderInfo};
use snapshare::ui::{render_feed, render_form, render_notice};
use snapshare::{observability, Client, Config, SnapshareError};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Why a command failed.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    App(#[from] SnapshareError),

    /// A form's banner message.
    #[error("{0}")]
    Form(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Parser)]
#[command(name = "snapshare", version, about = "Share photos with a json-server backed community")]
struct Cli {
    /// Config file (default: platform config dir / config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// REST store origin
    #[arg(long, global = true, env = "SNAPSHARE_BASE_URL")]
    base_url: Option<String>,

    /// Use the local file-backed store instead of HTTP
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account and log in
    Register(RegisterArgs),
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the saved session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List posts, newest first
    Feed {
        /// Only posts whose title or description contain every word
        #[arg(long, short)]
        search: Option<String>,
    },
    /// List your own posts
    Mine,
    /// Show one post
    Show { id: String },
    /// Publish a post
    Add(PostArgs),
    /// Change one of your posts
    Edit {
        id: String,
        #[command(flatten)]
        changes: EditArgs,
    },
    /// Delete one of your posts
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    Like { id: String },
    Unlike { id: String },
    Bookmark { id: String },
    Unbookmark { id: String },
    /// List your bookmarked posts
    Bookmarks,
}

#[derive(Debug, Args)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    /// Defaults to --password
    #[arg(long)]
    confirm_password: Option<String>,
}

#[derive(Debug, Args)]
struct PostArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    /// Image URL
    #[arg(long)]
    image: String,
}

#[derive(Debug, Args)]
struct EditArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    image: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    observability::init_tracing(&config);

    let result = snapshare::initialize(&config)
        .map_err(CliError::from)
        .and_then(|mut client| run(cli.command, &mut client));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::App(SnapshareError::Validation(errors))) => {
            for (field, message) in errors.iter() {
                eprintln!("{field}: {message}");
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> snapshare::Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    config.offline |= cli.offline;
    Ok(config)
}

fn run(command: Command, client: &mut Client) -> CliResult<()> {
    let _span = tracing::debug_span!("command", ?command).entered();
    let services = client.services.clone();
    let session = &mut client.session;

    match command {
        Command::Register(args) => {
            let mut page = Signup::new();
            page.form = SignupForm {
                confirm_password: args.confirm_password.unwrap_or_else(|| args.password.clone()),
                username: args.username,
                email: args.email,
                password: args.password,
            };
            let actions = page.submit(session);
            check_form(page.field_errors(), page.error())?;
            perform(actions)?;
            whoami(client);
        }
        Command::Login { email, password } => {
            let mut page = Login::new();
            page.email = email;
            page.password = password;
            let actions = page.submit(session);
            check_form(page.field_errors(), page.error())?;
            perform(actions)?;
            whoami(client);
        }
        Command::Logout => perform(navbar::logout(session))?,
        Command::Whoami => whoami(client),
        Command::Feed { search } => {
            let mut home = Homepage::new(services);
            if let Some(term) = search {
                home.set_search(term);
            }
            home.load(session.user());
            print!("{}", render_feed(&home.compute_viewmodel(session.user())));
        }
        Command::Mine => {
            let user = session.user().ok_or(SnapshareError::NotAuthenticated)?;
            let cards: Vec<CardView> = services
                .posts
                .posts_by_user(&user.id)
                .into_iter()
                .map(|post| CardView::from(&PostCard::load(post, &services, Some(user))))
                .collect();
            let vm = FeedViewModel {
                header: HeaderInfo {
                    title: "Your Posts".to_string(),
                },
                empty_state: cards.is_empty().then(|| EmptyState {
                    message: "No posts yet. Be the first to share a photo!".to_string(),
                }),
                cards,
                error: None,
                loading: false,
                show_add_button: true,
                confirm_delete: None,
            };
            print!("{}", render_feed(&vm));
        }
        Command::Show { id } => {
            let post = services.posts.get_post(&Id::from(id))?;
            let card = PostCard::load(post, &services, session.user());
            print!("{}", render_feed(&single_card(&card)));
        }
        Command::Add(args) => {
            let mut page = AddPost::new(services);
            page.form.draft.title = args.title;
            page.form.draft.description = args.description;
            page.form.draft.image = args.image;
            let actions = page.submit(session.user());
            if let Err(e) = check_form(page.form.field_errors(), page.form.error()) {
                eprint!("{}", render_form(&page.compute_viewmodel()));
                return Err(e);
            }
            perform(actions)?;
        }
        Command::Edit { id, changes } => {
            let mut page = EditPost::new(services, Id::from(id));
            page.load();
            if page.post().is_none() {
                check_form(page.form.field_errors(), page.form.error())?;
            }
            if let Some(title) = changes.title {
                page.form.draft.title = title;
            }
            if let Some(description) = changes.description {
                page.form.draft.description = description;
            }
            if let Some(image) = changes.image {
                page.form.draft.image = image;
            }
            let actions = page.submit(session.user())?;
            if let Err(e) = check_form(page.form.field_errors(), page.form.error()) {
                eprint!("{}", render_form(&page.compute_viewmodel()));
                return Err(e);
            }
            perform(actions)?;
            println!("Post updated.");
        }
        Command::Delete { id, yes } => {
            let id = Id::from(id);
            let mut home = Homepage::new(services);
            home.load(session.user());
            perform(home.request_delete(&id, session.user())?)?;

            if !yes {
                if let Some(dialog) = home.compute_viewmodel(session.user()).confirm_delete {
                    print!("{}: {} [y/N] ", dialog.title, dialog.message);
                    io::stdout().flush()?;
                }
            }
            if yes || confirmed()? {
                perform(home.confirm_delete())?;
            } else {
                home.cancel_delete();
                println!("Cancelled.");
            }
        }
        Command::Like { id } => toggle(&services, session, &id, Relation::Like, true)?,
        Command::Unlike { id } => toggle(&services, session, &id, Relation::Like, false)?,
        Command::Bookmark { id } => toggle(&services, session, &id, Relation::Bookmark, true)?,
        Command::Unbookmark { id } => toggle(&services, session, &id, Relation::Bookmark, false)?,
        Command::Bookmarks => {
            if !session.is_authenticated() {
                return Err(SnapshareError::NotAuthenticated.into());
            }
            let mut page = BookmarksPage::new(services);
            page.load(session.user());
            print!("{}", render_feed(&page.compute_viewmodel(session.user())));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Relation {
    Like,
    Bookmark,
}

/// Brings the viewer's like or bookmark on `id` to `wanted`.
fn toggle(
    services: &snapshare::Services,
    session: &snapshare::Session,
    id: &str,
    relation: Relation,
    wanted: bool,
) -> CliResult<()> {
    let post = services.posts.get_post(&Id::from(id))?;
    let mut card = PostCard::load(post, services, session.user());
    let current = match relation {
        Relation::Like => card.liked,
        Relation::Bookmark => card.bookmarked,
    };
    if current != wanted || session.user().is_none() {
        let actions = match relation {
            Relation::Like => card.toggle_like(services, session.user()),
            Relation::Bookmark => card.toggle_bookmark(services, session.user()),
        };
        perform(actions)?;
    }
    print!("{}", render_feed(&single_card(&card)));
    Ok(())
}

fn single_card(card: &PostCard) -> FeedViewModel {
    FeedViewModel {
        header: HeaderInfo {
            title: card.post.title.clone(),
        },
        cards: vec![CardView::from(card)],
        empty_state: None,
        error: None,
        loading: false,
        show_add_button: false,
        confirm_delete: None,
    }
}

fn whoami(client: &Client) {
    match client.session.user() {
        Some(user) => println!("{} <{}> ({})", user.username, user.email, user.id),
        None => println!("Not logged in."),
    }
}

/// Fails with the form's field errors or banner, if it shows any.
fn check_form(field_errors: &FieldErrors, banner: Option<&str>) -> CliResult<()> {
    if !field_errors.is_empty() {
        return Err(SnapshareError::Validation(field_errors.clone()).into());
    }
    banner.map_or(Ok(()), |message| Err(CliError::Form(message.to_string())))
}

fn confirmed() -> io::Result<bool> {
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Carries out controller actions.
///
/// # Errors
///
/// A login prompt becomes [`SnapshareError::NotAuthenticated`]; error notices
/// make the command fail after printing.
fn perform(actions: Vec<Action>) -> CliResult<()> {
    let mut failed = None;
    for action in actions {
        match action {
            Action::Navigate(route) => tracing::debug!(%route, "navigate"),
            Action::Notify(notice) => match notice.level {
                NoticeLevel::Success => println!("{}", render_notice(&notice)),
                NoticeLevel::Error => {
                    eprintln!("{}", render_notice(&notice));
                    failed = Some(notice.message);
                }
            },
            Action::PromptLogin => return Err(SnapshareError::NotAuthenticated.into()),
        }
    }
    failed.map_or(Ok(()), |message| Err(CliError::Form(message)))
}
