//! Line-oriented front-end over `TaskApp`.
//!
//! Each input line is parsed with clap into a `Command`. Free text after
//! `set <field>` and `filter name` is taken from the raw line, so inner
//! spacing survives. Field edits are
//! written straight into the app state; everything else becomes an
//! `Action`. After every command the screen is printed again.

use std::fmt::Write as _;

use anyhow::{anyhow, bail, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use task_core::{Action, AppState, TaskApp, TaskId, Transport};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(
    name = "tasks",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the full, unfiltered task list
    List,
    /// Fill a field of the edit surface while it is open, otherwise of the add form
    Set {
        field: Field,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "VALUE")]
        words: Vec<String>,
        #[arg(skip)]
        value: String,
    },
    /// Create a task from the add form
    Add,
    /// Open the edit surface for a task
    Edit { id: TaskId },
    /// Save the open edit
    Save,
    /// Close the edit surface without saving
    Cancel,
    /// Delete a task
    Delete { id: TaskId },
    /// Change the filter bar
    Filter {
        #[command(subcommand)]
        rule: FilterRule,
    },
    /// Show the list through the filter bar
    Apply,
    /// Show this help
    Help,
    /// Leave
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Field {
    Name,
    Info,
    Important,
    Completed,
}

#[derive(Debug, Subcommand)]
pub enum FilterRule {
    /// Only important tasks
    Important { state: Toggle },
    /// Hide completed tasks
    Completed { state: Toggle },
    /// Name must contain this text; no text clears the search
    Name {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "TEXT")]
        words: Vec<String>,
        #[arg(skip)]
        text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    fn is_on(self) -> bool {
        self == Toggle::On
    }
}

enum Flow {
    Continue,
    Help,
    Quit,
}

/// Parse one input line. `words` only drive clap; the text that `set` and
/// `filter name` store is the rest of the line as typed.
pub fn parse_line(line: &str) -> Result<Command, clap::Error> {
    let mut command = Line::try_parse_from(line.split_whitespace())?.command;
    match &mut command {
        Command::Set { value, .. } => *value = raw_tail(line, 2).to_string(),
        Command::Filter {
            rule: FilterRule::Name { text, .. },
        } => *text = raw_tail(line, 3).to_string(),
        _ => {}
    }
    Ok(command)
}

/// `line` with its first `words` words and the whitespace after them removed.
fn raw_tail(line: &str, words: usize) -> &str {
    let mut rest = line.trim_start();
    for _ in 0..words {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = rest[end..].trim_start();
    }
    rest
}

/// Read commands from stdin until EOF or `quit`.
pub async fn run<T: Transport>(app: &mut TaskApp<T>) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // failures land in the notice and are printed with the screen
    let _ = app.dispatch(Action::Refresh).await;
    stdout.write_all(screen(app.state()).as_bytes()).await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(err) => {
                stdout.write_all(err.render().to_string().as_bytes()).await?;
                continue;
            }
        };

        match handle(app, command).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => stdout.write_all(screen(app.state()).as_bytes()).await?,
            Ok(Flow::Help) => {
                let help = Line::command().render_long_help().to_string();
                stdout.write_all(help.as_bytes()).await?;
            }
            Err(err) => stdout.write_all(format!("error: {err:#}\n").as_bytes()).await?,
        }
    }
    Ok(())
}

async fn handle<T: Transport>(app: &mut TaskApp<T>, command: Command) -> Result<Flow> {
    debug!(?command, "command");
    let action = match command {
        Command::Quit => return Ok(Flow::Quit),
        Command::Help => return Ok(Flow::Help),
        Command::Set { field, value, .. } => {
            set_field(app.state_mut(), field, &value)?;
            return Ok(Flow::Continue);
        }
        Command::Filter { rule } => {
            set_filter(app.state_mut(), rule);
            return Ok(Flow::Continue);
        }
        Command::List => Action::Refresh,
        Command::Apply => Action::ApplyFilter,
        Command::Add => Action::Add,
        Command::Edit { id } => Action::Edit(id),
        Command::Save => Action::Save,
        Command::Cancel => Action::Cancel,
        Command::Delete { id } => Action::Delete(id),
    };
    // failures land in the notice and are printed with the screen
    let _ = app.dispatch(action).await;
    Ok(Flow::Continue)
}

/// Write `value` into the edit surface if it is open, otherwise the add form.
pub fn set_field(state: &mut AppState, field: Field, value: &str) -> Result<()> {
    let target = match state.edit.staged_mut() {
        Some(staged) => staged,
        None => &mut state.add_form,
    };
    match field {
        Field::Name => target.name = value.to_string(),
        Field::Info => target.info = value.to_string(),
        Field::Important => target.is_important = parse_flag(value)?,
        Field::Completed => target.is_completed = parse_flag(value)?,
    }
    Ok(())
}

pub fn set_filter(state: &mut AppState, rule: FilterRule) {
    match rule {
        FilterRule::Important { state: toggle } => {
            state.filter_bar.important_only = toggle.is_on()
        }
        FilterRule::Completed { state: toggle } => {
            state.filter_bar.hide_completed = toggle.is_on()
        }
        FilterRule::Name { text, .. } => state.filter_bar.name_contains = text,
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Ok(true),
        "off" | "no" | "false" | "0" => Ok(false),
        "" => bail!("expected on or off"),
        other => Err(anyhow!("expected on or off, got {other}")),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Everything currently visible, as text.
pub fn screen(state: &AppState) -> String {
    let mut out = String::new();
    let title = if state.list.filtered() { "tasks (filtered)" } else { "tasks" };
    let _ = writeln!(out, "---- {title} ----");
    let _ = writeln!(out, "{}", state.list);

    if let (Some(id), Some(staged)) = (state.edit.editing_id(), state.edit.staged()) {
        let _ = writeln!(out, "---- editing #{id} (save / cancel) ----");
        let _ = writeln!(out, "name:      {}", staged.name);
        let _ = writeln!(out, "info:      {}", staged.info);
        let _ = writeln!(out, "important: {}", yes_no(staged.is_important));
        let _ = writeln!(out, "completed: {}", yes_no(staged.is_completed));
    }

    if let Some(notice) = &state.notice {
        let _ = writeln!(out, "! {notice}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use task_core::{EditSession, Task, TaskError, TaskListView, ValidationError};

    fn parse(line: &str) -> Command {
        parse_line(line).unwrap()
    }

    fn task(id: TaskId, name: &str) -> Task {
        Task {
            id,
            name: name.to_string(),
            info: String::new(),
            is_important: false,
            is_completed: false,
        }
    }

    #[test]
    fn parses_multi_word_values() {
        match parse("set name Buy  Milk today") {
            Command::Set { field, value, .. } => {
                assert_eq!(field, Field::Name);
                assert_eq!(value, "Buy  Milk today");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn set_keeps_inner_spacing_verbatim() {
        match parse("  set   info line  with   gaps") {
            Command::Set { field, value, .. } => {
                assert_eq!(field, Field::Info);
                assert_eq!(value, "line  with   gaps");
            }
            other => panic!("unexpected {other:?}"),
        }
        match parse("set info") {
            Command::Set { value, .. } => assert_eq!(value, ""),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn filter_name_keeps_inner_spacing_verbatim() {
        let mut state = AppState::default();
        match parse("filter name buy   milk") {
            Command::Filter { rule } => set_filter(&mut state, rule),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(state.filter_bar.name_contains, "buy   milk");
    }

    #[test]
    fn parses_ids_and_filters() {
        assert!(matches!(parse("delete 7"), Command::Delete { id: 7 }));
        assert!(matches!(parse("edit 3"), Command::Edit { id: 3 }));
        assert!(matches!(
            parse("filter completed on"),
            Command::Filter {
                rule: FilterRule::Completed { state: Toggle::On }
            }
        ));
        assert!(matches!(parse("exit"), Command::Quit));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_line("delete seven").is_err());
        assert!(parse_line("frobnicate").is_err());
    }

    #[test]
    fn set_targets_add_form_when_idle() {
        let mut state = AppState::default();
        set_field(&mut state, Field::Name, "New").unwrap();
        set_field(&mut state, Field::Important, "on").unwrap();
        assert_eq!(state.add_form.name, "New");
        assert!(state.add_form.is_important);
    }

    #[test]
    fn set_targets_edit_surface_when_open() {
        let mut state = AppState::default();
        state.edit.begin(&task(4, "Old"));
        set_field(&mut state, Field::Name, "Renamed").unwrap();
        set_field(&mut state, Field::Completed, "yes").unwrap();
        assert_eq!(state.edit.staged().unwrap().name, "Renamed");
        assert!(state.edit.staged().unwrap().is_completed);
        assert_eq!(state.add_form.name, "");
    }

    #[test]
    fn bad_flag_value_is_an_error() {
        let mut state = AppState::default();
        assert!(set_field(&mut state, Field::Completed, "maybe").is_err());
        assert!(set_field(&mut state, Field::Completed, "").is_err());
    }

    #[test]
    fn filter_rules_update_filter_bar() {
        let mut state = AppState::default();
        set_filter(&mut state, FilterRule::Important { state: Toggle::On });
        set_filter(
            &mut state,
            FilterRule::Name {
                words: Vec::new(),
                text: "buy milk".to_string(),
            },
        );
        assert!(state.filter_bar.important_only);
        assert_eq!(state.filter_bar.name_contains, "buy milk");
        match parse("filter name") {
            Command::Filter { rule } => set_filter(&mut state, rule),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(state.filter_bar.name_contains, "");
    }

    #[test]
    fn screen_shows_list_edit_surface_and_notice() {
        let mut state = AppState {
            list: TaskListView::rebuild(vec![task(1, "X")], true),
            ..Default::default()
        };
        state.edit = EditSession::Editing {
            id: 1,
            staged: task(1, "X").fields(),
        };
        state.notice = Some(TaskError::Validation(ValidationError::BlankName));

        let text = screen(&state);
        assert!(text.contains("---- tasks (filtered) ----"));
        assert!(text.contains("#1 [Standard] [In progress] X"));
        assert!(text.contains("editing #1"));
        assert!(text.contains("! Enter a task name"));
    }

    #[test]
    fn screen_hides_closed_edit_surface() {
        let text = screen(&AppState::default());
        assert!(text.contains("(no tasks)"));
        assert!(!text.contains("editing"));
    }
}
