pub mod commands;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use crate::store::CategoryKind;

/// Environment variable holding the admin password.
pub const PASSWORD_ENV: &str = "SAJADAH_PASSWORD";

#[derive(Parser)]
#[command(name = "sajadah")]
#[command(about = "Daily prayers, hadith and prayer times in the terminal", long_about = None)]
pub struct Cli {
    /// Database file (default: data dir/sajadah/sajadah.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (default: ~/.config/sajadah/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Doa,
    Hadith,
}

impl From<Kind> for CategoryKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Doa => CategoryKind::Doa,
            Kind::Hadith => CategoryKind::Hadith,
        }
    }
}

#[derive(clap::Args, Debug, Default)]
pub struct ListArgs {
    /// Only show this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Case-insensitive text search
    #[arg(short, long)]
    pub query: Option<String>,

    /// Print the full text of every entry
    #[arg(long)]
    pub full: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List daily prayers
    Doa(ListArgs),
    /// List hadith
    Hadith(ListArgs),
    /// List the categories of a collection
    Categories { kind: Kind },
    /// Prayer times for a place and day
    Schedule {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Day as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Search for a city to get its coordinates
    City { name: Vec<String> },
    /// Hijri calendar for a Gregorian month
    Calendar {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
    /// Qibla direction from a place
    Qibla {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Launch the TUI
    Tui {
        /// Log in as this admin to enable deleting entries
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Manage stored content
    Admin {
        /// Admin username (default: [admin].username from config)
        #[arg(short, long)]
        username: Option<String>,

        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
pub enum AdminAction {
    /// Add a doa
    AddDoa {
        #[arg(long)]
        title: String,
        #[arg(long)]
        arabic: String,
        #[arg(long)]
        latin: String,
        #[arg(long)]
        translation: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// Change fields of a stored doa
    EditDoa {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        arabic: Option<String>,
        #[arg(long)]
        latin: Option<String>,
        #[arg(long)]
        translation: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a stored doa
    DeleteDoa { id: String },
    /// Add a hadith
    AddHadith {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        arabic: String,
        #[arg(long)]
        latin: String,
        #[arg(long)]
        translation: String,
        #[arg(long)]
        explanation: String,
        #[arg(long)]
        narrator: String,
    },
    /// Change fields of a stored hadith
    EditHadith {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        arabic: Option<String>,
        #[arg(long)]
        latin: Option<String>,
        #[arg(long)]
        translation: Option<String>,
        #[arg(long)]
        explanation: Option<String>,
        #[arg(long)]
        narrator: Option<String>,
    },
    /// Delete a stored hadith
    DeleteHadith { id: String },
    /// Add a category
    AddCategory { kind: Kind, name: String },
    /// Delete a category by id
    DeleteCategory { kind: Kind, id: String },
    /// Import a JSON array of entries
    Import { kind: Kind, path: PathBuf },
    /// List stored entries with their ids
    List {
        kind: Kind,
        #[command(flatten)]
        filter: ListArgs,
    },
    /// Print the SHA-256 digest of a password for the config file
    HashPassword,
}

impl AdminAction {
    /// Whether the action needs a logged-in admin.
    pub fn requires_session(&self) -> bool {
        !matches!(self, AdminAction::HashPassword)
    }
}
