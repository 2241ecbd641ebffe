use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use prep_core::model::QuestionId;
use storage::json::{DEFAULT_PROGRESS_FILE, DEFAULT_QUESTIONS_FILE};

#[derive(Debug, Parser)]
#[command(
    name = "interview-prep",
    version,
    about = "Practice interview questions and track your progress"
)]
pub struct Cli {
    /// Questions document
    #[arg(
        long,
        global = true,
        env = "INTERVIEW_QUESTIONS_FILE",
        default_value = DEFAULT_QUESTIONS_FILE
    )]
    pub questions: PathBuf,

    /// Progress document
    #[arg(
        long,
        global = true,
        env = "INTERVIEW_PROGRESS_FILE",
        default_value = DEFAULT_PROGRESS_FILE
    )]
    pub progress: PathBuf,

    /// SQLite URL; replaces the JSON documents when set
    #[arg(long, global = true, env = "INTERVIEW_DB_URL")]
    pub db: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Log level used when `RUST_LOG` is unset.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        match self.command {
            Some(Command::Serve { .. }) => "info",
            _ => "warn",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive terminal menu (default)
    Menu {
        /// Shuffle questions in practice sessions
        #[arg(long)]
        shuffle: bool,
    },
    /// Serve the JSON API
    Serve {
        #[arg(long, env = "INTERVIEW_ADDR", default_value = "127.0.0.1:5000")]
        addr: SocketAddr,
    },
    #[command(flatten)]
    Store(StoreCommand),
}

/// One-shot commands mapping directly onto store operations.
#[derive(Debug, Clone, Subcommand)]
pub enum StoreCommand {
    /// List questions
    List {
        /// Only this category ("all" for every category)
        #[arg(long)]
        category: Option<String>,
        /// Only unanswered questions
        #[arg(long)]
        unanswered: bool,
    },
    /// List distinct categories
    Categories,
    /// Show completion statistics
    Stats,
    /// Show one question
    Show { id: QuestionId },
    /// Add a question
    Add {
        question: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, alias = "notes")]
        hint: Option<String>,
    },
    /// Update fields of a question
    Update {
        id: QuestionId,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        question: Option<String>,
        #[arg(long, alias = "notes")]
        hint: Option<String>,
    },
    /// Delete a question and its progress
    Delete { id: QuestionId },
    /// Flip the answered flag of a question
    Toggle { id: QuestionId },
    /// Discard all recorded progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}
