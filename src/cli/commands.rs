use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::TaskKind;

#[derive(Parser)]
#[command(name = "htui", about = concat!("habitui v", env!("CARGO_PKG_VERSION"), " - habits, dailies and to-dos in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different config file
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store API credentials in the config file
    Login(LoginArgs),
    /// List habits, dailies and to-dos
    List(ListArgs),
    /// Show user statistics
    Stats,
    /// Score a habit up
    Up(TaskArgs),
    /// Score a habit down
    Down(TaskArgs),
    /// Complete a daily or to-do (un-checks a completed daily)
    Done(TaskArgs),
    /// Delete a task
    Delete(TaskArgs),
    /// Change a task's title
    Edit(EditArgs),
    /// Show recent party chat
    Party(PartyArgs),
}

#[derive(Args)]
pub struct LoginArgs {
    /// Habitica user id
    pub user_id: String,
    /// Habitica API token
    pub api_key: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MenuArg {
    Habits,
    Dailies,
    Todos,
}

impl From<MenuArg> for TaskKind {
    fn from(menu: MenuArg) -> Self {
        match menu {
            MenuArg::Habits => TaskKind::Habit,
            MenuArg::Dailies => TaskKind::Daily,
            MenuArg::Todos => TaskKind::Todo,
        }
    }
}

#[derive(Args)]
pub struct ListArgs {
    /// Only list one menu
    #[arg(value_enum)]
    pub menu: Option<MenuArg>,
}

#[derive(Args)]
pub struct TaskArgs {
    /// Task id or unique id prefix
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id or unique id prefix
    pub id: String,
    /// New title
    pub title: String,
}

#[derive(Args)]
pub struct PartyArgs {
    /// Number of messages to show
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,
}
