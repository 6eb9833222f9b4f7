// SPDX-License-Identifier: MPL-2.0

use clap::{Parser, Subcommand};
use photogram::model::FollowRequestId;
use photogram::state::Settings;
use photogram::store::{CommentStore, FollowRequestStore, LikeStore, PhotoStore, UserStore};
use photogram::{FollowStatus, Store, StoreError, UserRelations, UserView, logging};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "photogram",
    about = "Manage a photogram database and inspect user associations",
    version
)]
struct Cli {
    /// Database file. Falls back to `PHOTOGRAM_DB`, then settings, then the
    /// platform data directory.
    #[arg(long, value_name = "path", global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the database schema
    Init,
    /// Register a user
    AddUser {
        username: String,
        #[arg(long)]
        private: bool,
    },
    /// List every user as JSON
    Users,
    /// Add a photo owned by a user
    AddPhoto {
        owner: String,
        image: String,
        #[arg(long)]
        caption: Option<String>,
    },
    /// List every photo as JSON
    Photos,
    /// Like a photo as a user
    Like { username: String, photo_id: i64 },
    /// Comment on a photo as a user
    Comment {
        username: String,
        photo_id: i64,
        body: String,
    },
    /// Send a follow request
    Follow {
        sender: String,
        recipient: String,
        #[arg(long, default_value = "pending")]
        status: FollowStatus,
    },
    /// Accept a pending follow request
    Accept { request_id: FollowRequestId },
    /// Print one of a user's associations as JSON
    Show { username: String, view: UserView },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = Settings::load();
    logging::init(settings.log_filter());

    match run(cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("photogram: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), StoreError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli, settings: &Settings) -> Result<(), StoreError> {
    let path = settings
        .resolve_database_path(cli.db)
        .ok_or_else(|| StoreError::Path("could not find data directory".to_string()))?;
    let store = Store::open(&path)?;
    let users = UserStore::new(&store);

    match cli.command {
        Command::Init => {
            tracing::info!(path = %path.display(), "database ready");
        }
        Command::AddUser { username, private } => {
            print_json(&users.create(&username, private)?)?;
        }
        Command::Users => {
            print_json(&users.list()?)?;
        }
        Command::AddPhoto {
            owner,
            image,
            caption,
        } => {
            let owner = users.get_by_username(&owner)?;
            let photo = PhotoStore::new(&store).create(owner.id, caption.as_deref(), &image)?;
            print_json(&photo)?;
        }
        Command::Photos => {
            print_json(&PhotoStore::new(&store).list()?)?;
        }
        Command::Like { username, photo_id } => {
            let fan = users.get_by_username(&username)?;
            print_json(&LikeStore::new(&store).create(fan.id, photo_id)?)?;
        }
        Command::Comment {
            username,
            photo_id,
            body,
        } => {
            let author = users.get_by_username(&username)?;
            print_json(&CommentStore::new(&store).create(author.id, photo_id, &body)?)?;
        }
        Command::Follow {
            sender,
            recipient,
            status,
        } => {
            let sender = users.get_by_username(&sender)?;
            let recipient = users.get_by_username(&recipient)?;
            let request = FollowRequestStore::new(&store).create(sender.id, recipient.id, status)?;
            print_json(&request)?;
        }
        Command::Accept { request_id } => {
            print_json(&FollowRequestStore::new(&store).accept(request_id)?)?;
        }
        Command::Show { username, view } => {
            let user = users.get_by_username(&username)?;
            let rows = UserRelations::of(&store, &user).view(view)?;
            tracing::debug!(%view, rows = rows.len(), "resolved view");
            print_json(&rows)?;
        }
    }

    Ok(())
}
