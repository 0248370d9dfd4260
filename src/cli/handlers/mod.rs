mod login;
pub use login::cmd_login;

use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::io::logging::{self, LogTarget};
use crate::model::{AppConfig, Session, TaskKind, Toggle};
use crate::ops::{SyncFailure, flush, load_session, party_chat};
use crate::remote::{HabiticaClient, RemoteClient};

/// Error type for CLI commands that the toggle rules refuse
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("cannot {toggle} {kind} task {id}")]
    NotApplicable {
        toggle: Toggle,
        kind: TaskKind,
        id: String,
    },
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Resolve the config file from `-c` or the platform default
pub fn config_path(cli: &Cli) -> Result<PathBuf, ConfigError> {
    match &cli.config {
        Some(path) => Ok(PathBuf::from(path)),
        None => config_io::default_config_path(),
    }
}

/// Load config, set up logging and build the remote client
pub fn connect(config: &AppConfig) -> Result<HabiticaClient, ConfigError> {
    let account = config_io::resolve_account(config)?;
    Ok(HabiticaClient::new(&account, &config.server))
}

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let path = config_path(&cli)?;

    let command = match cli.command {
        Some(Commands::Login(args)) => return cmd_login(args, &path),
        Some(command) => command,
        None => return Err("no command given (run without arguments for the TUI)".into()),
    };

    let config = config_io::read_config(&path)?;
    logging::init(&config.log, LogTarget::Stderr)?;
    let client = connect(&config)?;

    match run(command, json, &client) {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => {
            if let Some(partial) = partial_report(e.as_ref(), json) {
                print!("{}", partial);
            }
            Err(e)
        }
    }
}

/// Output for the work a stopped sync already applied, if there was any
pub fn partial_report(err: &(dyn std::error::Error + 'static), json: bool) -> Option<String> {
    let failure = err.downcast_ref::<SyncFailure>()?;
    if failure.report.operations == 0 {
        return None;
    }
    if json {
        let text = serde_json::to_string_pretty(&failure.report).ok()?;
        return Some(format!("{}\n", text));
    }
    Some(format_report(&failure.report))
}

/// Execute a command against a remote and return what to print
pub fn run(
    command: Commands,
    json: bool,
    remote: &dyn RemoteClient,
) -> Result<String, Box<dyn std::error::Error>> {
    match command {
        Commands::Login(_) => Err("login is handled before connecting".into()),
        Commands::List(args) => cmd_list(args, json, remote),
        Commands::Stats => cmd_stats(json, remote),
        Commands::Up(args) => cmd_toggle(&args.id, Toggle::MarkUp, None, json, remote),
        Commands::Down(args) => cmd_toggle(&args.id, Toggle::MarkDown, None, json, remote),
        Commands::Done(args) => cmd_toggle(&args.id, Toggle::Complete, None, json, remote),
        Commands::Delete(args) => cmd_toggle(&args.id, Toggle::Delete, None, json, remote),
        Commands::Edit(args) => cmd_toggle(&args.id, Toggle::Edit, Some(args.title), json, remote),
        Commands::Party(args) => cmd_party(args, json, remote),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(
    args: ListArgs,
    json: bool,
    remote: &dyn RemoteClient,
) -> Result<String, Box<dyn std::error::Error>> {
    let session = load_session(remote)?;
    let kinds: Vec<TaskKind> = match args.menu {
        Some(menu) => vec![menu.into()],
        None => TaskKind::ALL.to_vec(),
    };

    if json {
        let tasks: Vec<TaskJson> = kinds
            .iter()
            .flat_map(|kind| session.collection(*kind).iter())
            .map(task_to_json)
            .collect();
        return Ok(format!("{}\n", serde_json::to_string_pretty(&tasks)?));
    }

    let menus: Vec<String> = kinds
        .iter()
        .map(|kind| format_menu(&session, *kind))
        .collect();
    Ok(menus.join("\n"))
}

fn cmd_stats(json: bool, remote: &dyn RemoteClient) -> Result<String, Box<dyn std::error::Error>> {
    let session = load_session(remote)?;
    if json {
        return Ok(format!(
            "{}\n",
            serde_json::to_string_pretty(&stats_to_json(&session.stats))?
        ));
    }
    Ok(format_stats(&session.stats))
}

fn cmd_party(
    args: PartyArgs,
    json: bool,
    remote: &dyn RemoteClient,
) -> Result<String, Box<dyn std::error::Error>> {
    let messages = party_chat(remote, args.limit)?;
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&messages)?));
    }
    Ok(format_chat(&messages))
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

/// Stage one action through the normal toggle rules and run a sync cycle
fn cmd_toggle(
    id: &str,
    toggle: Toggle,
    draft: Option<String>,
    json: bool,
    remote: &dyn RemoteClient,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut session = load_session(remote)?;
    stage(&mut session, id, toggle, draft)?;

    let report = flush(&mut session, remote)?;
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&report)?));
    }
    Ok(format_report(&report))
}

fn stage(
    session: &mut Session,
    id: &str,
    toggle: Toggle,
    draft: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = session.resolve_id(id)?;
    if let Some(task) = session.find_mut(&id) {
        if !task.toggle(toggle) {
            return Err(CommandError::NotApplicable {
                toggle,
                kind: task.kind(),
                id,
            }
            .into());
        }
    }
    if let Some(title) = draft {
        session.set_draft(&id, title);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccountSnapshot, Directions, DropEvent, StatDelta, Task};
    use crate::ops::test_helpers::*;
    use crate::ops::{SyncError, SyncReport};
    use crate::remote::{Operation, RemoteError};

    fn remote() -> ScriptedRemote {
        let mut remote = ScriptedRemote::always(stats(50.0, 12.0, 10.0, 30.0, 3));
        remote.snapshot = AccountSnapshot {
            stats: stats(50.0, 10.0, 10.0, 25.0, 3),
            tasks: vec![
                Task::habit("h-111", "Floss", Directions { up: true, down: false }),
                Task::new("d-222", TaskKind::Daily, "Stretch"),
                Task::new("t-333", TaskKind::Todo, "Taxes"),
            ],
        };
        remote
    }

    #[test]
    fn list_one_menu() {
        let remote = remote();
        let out = run(
            Commands::List(ListArgs {
                menu: Some(MenuArg::Todos),
            }),
            false,
            &remote,
        )
        .unwrap();
        assert_eq!(out, "TODOs\n  [ ] t-333  Taxes\n");
    }

    #[test]
    fn list_json_is_array() {
        let remote = remote();
        let out = run(Commands::List(ListArgs { menu: None }), true, &remote).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
    }

    #[test]
    fn done_by_prefix_scores_and_reports() {
        let remote = remote();
        let out = run(
            Commands::Done(TaskArgs { id: "d-".into() }),
            false,
            &remote,
        )
        .unwrap();
        assert_eq!(out, "exp +5 gp +2\n");
        assert_eq!(
            remote.calls(),
            vec![Operation::ScoreUp {
                task_id: "d-222".into()
            }]
        );
    }

    #[test]
    fn rejected_toggle_makes_no_calls() {
        let remote = remote();
        let err = run(
            Commands::Down(TaskArgs { id: "h-111".into() }),
            false,
            &remote,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "cannot mark down habit task h-111");
        assert!(remote.calls().is_empty());
    }

    #[test]
    fn edit_sends_draft() {
        let remote = remote();
        run(
            Commands::Edit(EditArgs {
                id: "t-333".into(),
                title: "Taxes 2024".into(),
            }),
            true,
            &remote,
        )
        .unwrap();
        assert_eq!(
            remote.calls(),
            vec![Operation::Update {
                task_id: "t-333".into(),
                title: "Taxes 2024".into()
            }]
        );
    }

    #[test]
    fn unknown_id_is_an_error() {
        let remote = remote();
        let err = run(Commands::Delete(TaskArgs { id: "zz".into() }), false, &remote).unwrap_err();
        assert_eq!(err.to_string(), "task not found: zz");
    }

    #[test]
    fn stopped_sync_still_reports_applied_work() {
        let failure = SyncFailure {
            report: SyncReport {
                delta: StatDelta {
                    gold: 2,
                    ..Default::default()
                },
                drops: vec![DropEvent("You found Meat!".into())],
                operations: 1,
            },
            error: SyncError::Transport {
                op: Operation::Delete {
                    task_id: "t-333".into(),
                },
                source: RemoteError::Transport("offline".into()),
            },
        };
        let err: Box<dyn std::error::Error> = failure.into();
        assert_eq!(
            partial_report(err.as_ref(), false).as_deref(),
            Some("gp +2\ndrop: You found Meat!\n")
        );
        let json: serde_json::Value =
            serde_json::from_str(&partial_report(err.as_ref(), true).unwrap()).unwrap();
        assert_eq!(json["operations"], 1);
        assert_eq!(json["delta"]["gold"], 2);
    }

    #[test]
    fn failed_action_with_nothing_applied_prints_no_report() {
        let mut failing = ScriptedRemote::new(vec![Err(RemoteError::Transport("offline".into()))]);
        failing.snapshot = remote().snapshot.clone();
        let err = run(Commands::Done(TaskArgs { id: "d-".into() }), false, &failing).unwrap_err();
        assert!(err.downcast_ref::<SyncFailure>().is_some());
        assert_eq!(partial_report(err.as_ref(), false), None);

        let lookup = run(Commands::Done(TaskArgs { id: "zz".into() }), false, &failing).unwrap_err();
        assert_eq!(partial_report(lookup.as_ref(), false), None);
    }

    #[test]
    fn party_prints_chat() {
        let mut remote = remote();
        remote.chat = Some(vec![
            chat_message("bob", "see you at the boss"),
            chat_message("alice", "hi all"),
        ]);
        let out = run(Commands::Party(PartyArgs { limit: 20 }), false, &remote).unwrap();
        assert_eq!(out, "alice\n  hi all\nbob\n  see you at the boss\n");

        let out = run(Commands::Party(PartyArgs { limit: 1 }), true, &remote).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["author"], "bob");
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn party_without_a_party_is_an_error() {
        let mut remote = remote();
        remote.chat = None;
        let err = run(Commands::Party(PartyArgs { limit: 20 }), false, &remote).unwrap_err();
        assert_eq!(err.to_string(), "server returned HTTP 404: Group not found.");
    }
}
