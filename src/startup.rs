//! Command dispatch for the `photoshare` binary.
//!
//! Builds the application state from the loaded configuration, bootstraps
//! the session and runs a single command through the view controllers.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;
use tracing::{debug, info, warn};

use crate::api::NewUser;
use crate::config::ConfigV1;
use crate::controllers::{
    AppController, ChangePassController, DetailController, ListController, LoginController,
    RecoverPassController, SignupController, TagsController, UploadController,
};
use crate::models::{NewPhoto, Photo, Session};
use crate::navigation::Route;
use crate::state::AppState;
use crate::store::create_store;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the JSON schema of the configuration file
    Schema,
    /// Show the current session
    Whoami,
    Login {
        /// User name or email address
        identifier: String,
        password: String,
    },
    Logout,
    Signup {
        name: String,
        email: String,
        password: String,
    },
    /// Newest photos first
    Latest {
        #[arg(default_value_t = 1)]
        pages: u32,
    },
    /// Most voted photos first
    Popular {
        #[arg(default_value_t = 1)]
        pages: u32,
    },
    Search {
        q: String,
    },
    /// Photos uploaded by one user
    Owner {
        id: i64,
    },
    Tags,
    Show {
        id: i64,
    },
    VoteUp {
        id: i64,
    },
    VoteDown {
        id: i64,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    Title {
        id: i64,
        title: String,
    },
    Retag {
        id: i64,
        tags: Vec<String>,
    },
    Upload {
        file: PathBuf,
        title: String,
        tags: Vec<String>,
    },
    /// Mail a password recovery code
    Recover {
        email: String,
    },
    /// Change the password, with a recovery code when logged out
    Passwd {
        password: String,
        code: Option<String>,
    },
}

/// Build the application state and run `command`.
pub async fn run(config: ConfigV1, command: Command) -> Result<(), Box<dyn Error>> {
    let store = create_store(&config.store);
    info!("Using backend at {}", config.api.base_url);
    let state = AppState::new(config, store)?;

    let result = execute(&state, command).await;
    print_alert(&state);
    if state.navigator.current() == Route::Login {
        eprintln!("Login required: run `photoshare login <identifier> <password>`");
    }
    result
}

/// Run one command against an initialised application state.
pub async fn execute(state: &AppState, command: Command) -> Result<(), Box<dyn Error>> {
    let app = AppController::new(state);
    // Without a session the user is anonymous, and can still log in.
    let session = match app.init().await {
        Ok(session) => session,
        Err(e) => {
            warn!("Could not load the session, continuing logged out: {}", e);
            state.session.clear();
            Session::default()
        }
    };
    debug!("Running {:?} as {:?}", command, session.name);

    match command {
        Command::Schema => crate::config::print_schema()?,
        Command::Whoami => {
            if session.logged_in {
                let role = if session.is_admin { " (admin)" } else { "" };
                println!(
                    "{} #{}{}",
                    session.name.unwrap_or_default(),
                    session.id.unwrap_or_default(),
                    role
                );
            } else {
                println!("Not logged in");
            }
        }
        Command::Login {
            identifier,
            password,
        } => {
            state.navigator.go(Route::Login);
            let logged_in = LoginController::new(state)
                .login(&identifier, &password)
                .await?;
            if !logged_in {
                println!("Login failed");
            }
        }
        Command::Logout => app.logout().await?,
        Command::Signup {
            name,
            email,
            password,
        } => {
            let user = NewUser {
                name,
                email,
                password,
            };
            SignupController::new(state).signup(&user).await?;
        }
        Command::Latest { pages } => list(state, Route::Latest, pages).await?,
        Command::Popular { pages } => list(state, Route::Popular, pages).await?,
        Command::Search { q } => list(state, Route::Search(q), u32::MAX).await?,
        Command::Owner { id } => {
            let route = Route::Owner {
                id,
                name: String::new(),
            };
            list(state, route, u32::MAX).await?
        }
        Command::Tags => {
            let mut controller = TagsController::new(state);
            controller.load().await?;
            for tag in controller.tags() {
                println!("{:>5}  {}", tag.num_photos, tag.name);
            }
        }
        Command::Show { id } => {
            if let Some(controller) = detail(state, id).await? {
                if let Some(photo) = controller.photo() {
                    print_detail(photo);
                }
            }
        }
        Command::VoteUp { id } => {
            if let Some(mut controller) = detail(state, id).await? {
                if !controller.vote_up().await? {
                    println!("You cannot vote for photo {}", id);
                }
            }
        }
        Command::VoteDown { id } => {
            if let Some(mut controller) = detail(state, id).await? {
                if !controller.vote_down().await? {
                    println!("You cannot vote for photo {}", id);
                }
            }
        }
        Command::Delete { id, yes } => {
            if let Some(mut controller) = detail(state, id).await? {
                let confirmed = yes || confirm("You sure you want to delete this?")?;
                if !controller.delete(confirmed).await? && confirmed {
                    println!("You cannot delete photo {}", id);
                }
            }
        }
        Command::Title { id, title } => {
            if let Some(mut controller) = detail(state, id).await? {
                controller.show_edit_form();
                if controller.editing_title() {
                    controller.update_title(&title).await?;
                } else {
                    println!("You cannot edit photo {}", id);
                }
            }
        }
        Command::Retag { id, tags } => {
            if let Some(mut controller) = detail(state, id).await? {
                controller.show_edit_tags_form();
                if controller.editing_tags() {
                    controller.taglist = tags.join(" ");
                    controller.update_tags().await?;
                } else {
                    println!("You cannot edit photo {}", id);
                }
            }
        }
        Command::Upload { file, title, tags } => {
            let mut controller = UploadController::new(state);
            if state.navigator.current() == Route::Upload {
                let photo = read_photo(&file, title, tags.join(" ")).await?;
                let created = controller.upload(&photo).await?;
                print_summary(&created);
            }
        }
        Command::Recover { email } => RecoverPassController::new(state).recover(&email).await?,
        Command::Passwd { password, code } => {
            state.navigator.go(Route::ChangePass);
            let controller = ChangePassController::new(state, code);
            if state.navigator.current() == Route::ChangePass {
                controller.change_password(&password).await?;
            }
        }
    }
    Ok(())
}

async fn list(state: &AppState, route: Route, pages: u32) -> Result<(), Box<dyn Error>> {
    let mut controller = ListController::new(state, &route);
    let mut fetched = 0;
    while fetched < pages && !controller.is_exhausted() {
        controller.next_page().await?;
        fetched += 1;
    }
    for photo in controller.photos() {
        print_summary(photo);
    }
    if controller.photos().is_empty() {
        println!("No photos found");
    }
    Ok(())
}

async fn detail(state: &AppState, id: i64) -> Result<Option<DetailController>, Box<dyn Error>> {
    state.navigator.go(Route::Detail(id));
    let mut controller = DetailController::new(state, id);
    controller.load().await?;
    if controller.not_found() {
        println!("Photo {} not found", id);
        return Ok(None);
    }
    Ok(Some(controller))
}

async fn read_photo(path: &Path, title: String, taglist: String) -> io::Result<NewPhoto> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());
    Ok(NewPhoto {
        title,
        taglist,
        content_type: content_type(&file_name).to_string(),
        file_name,
        bytes,
    })
}

fn content_type(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

fn confirm(question: &str) -> io::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn print_summary(photo: &Photo) {
    println!(
        "#{:<6} {:>4} votes  {}  by {}",
        photo.id, photo.vote_count, photo.title, photo.owner_name
    );
}

fn print_detail(photo: &Photo) {
    println!("#{} {}", photo.id, photo.title);
    println!("  by:    {} (#{})", photo.owner_name, photo.owner_id);
    println!("  file:  {}", photo.photo);
    println!("  votes: {}", photo.vote_count);
    println!("  tags:  {}", photo.tags.join(" "));
}

fn print_alert(state: &AppState) {
    if let Some(alert) = state.alerts.current() {
        println!("[{}] {}", alert.level, alert.message);
    }
}
