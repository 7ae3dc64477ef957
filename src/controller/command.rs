use clap::Subcommand;

use crate::records::{ItemType, RecordId};

/// One record store operation, as typed on the command line.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List every registered user
    Users,
    /// Register a new user and log them in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in with an email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show the logged-in user
    Whoami,
    /// Change fields of the logged-in user
    UpdateProfile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long, conflicts_with = "clear_profile_image")]
        profile_image: Option<String>,
        #[arg(long)]
        clear_profile_image: bool,
    },
    /// Log out
    Logout,
    /// List the logged-in user's items, or everyone's with --all
    Items {
        #[arg(long)]
        all: bool,
    },
    /// Create a task or note for the logged-in user
    Add {
        #[arg(long = "type")]
        item_type: ItemType,
        #[arg(long)]
        content: String,
        #[arg(long)]
        status: Option<String>,
    },
    /// Change fields of an item
    UpdateItem {
        id: RecordId,
        #[arg(long = "type")]
        item_type: Option<ItemType>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete an item
    DeleteItem { id: RecordId },
}
