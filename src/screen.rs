//! Plain-text rendering of the pick screen and parsing of typed commands

use crate::app::pick_use_case::{PickSession, ScreenState};
use crate::tracker::{ButtonState, SelectionTracker, ToggleOutcome};
use crate::types::{ItemId, Selectable};
use std::fmt::Write;

/// One line of input in interactive mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Toggle { item: String, category: String },
    Show { item: String },
    List,
    Status,
    Payload,
    Submit,
    Refresh,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  <item> <category>   toggle a category for an item (item = name or list number)
  show <item>         expand an item's details
  list                show the catalog with current picks
  status              show picks and whether submit is enabled
  payload             print the submission body
  submit              send a complete selection
  refresh             reload the catalog and clear picks
  help                show this help
  quit                leave without submitting";

/// Parses one input line. The category is the last word so item names may contain spaces.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let lower = line.to_lowercase();
    let simple = match lower.as_str() {
        "list" | "ls" => Some(Command::List),
        "status" | "st" => Some(Command::Status),
        "payload" => Some(Command::Payload),
        "submit" => Some(Command::Submit),
        "refresh" | "reload" => Some(Command::Refresh),
        "help" | "?" => Some(Command::Help),
        "quit" | "exit" | "q" => Some(Command::Quit),
        _ => None,
    };
    if simple.is_some() {
        return simple;
    }

    for prefix in ["show ", "details "] {
        let matches = line.get(..prefix.len()).is_some_and(|head| head.eq_ignore_ascii_case(prefix));
        if matches {
            let item = line[prefix.len()..].trim();
            return (!item.is_empty()).then(|| Command::Show { item: item.to_string() });
        }
    }

    let rest = line
        .strip_prefix("toggle ")
        .or_else(|| line.strip_prefix("t "))
        .unwrap_or(line)
        .trim();
    let (item, category) = rest.rsplit_once(char::is_whitespace)?;
    let item = item.trim();
    if item.is_empty() {
        return None;
    }
    Some(Command::Toggle {
        item: item.to_string(),
        category: category.to_string(),
    })
}

/// Renders the catalog with one button per category:
/// `[x]` held by this item, `[ ]` free, `[-]` held by another item.
pub fn render_catalog<T: Selectable>(tracker: &SelectionTracker<T>) -> String {
    let catalog = tracker.catalog();
    let mut out = String::new();
    for (item_id, item) in catalog.items() {
        let _ = write!(out, "{:>3}. {:<40}", item_id.index() + 1, item.summary());
        for (category_id, category) in catalog.categories().iter() {
            let mark = match tracker.button_state(item_id, category_id) {
                ButtonState::Active => 'x',
                ButtonState::Available => ' ',
                ButtonState::Disabled => '-',
            };
            let _ = write!(out, " [{}] {}", mark, category.display);
        }
        out.push('\n');
    }
    out
}

pub fn render_status<T: Selectable>(tracker: &SelectionTracker<T>) -> String {
    let catalog = tracker.catalog();
    let mut out = String::new();
    for (category_id, category) in catalog.categories().iter() {
        let holder = tracker
            .holder_of(category_id)
            .map(|item| catalog.key(item).to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "{:<12} {}", category.display, holder);
    }
    let _ = write!(
        out,
        "{}/{} assigned, submit {}",
        tracker.len(),
        tracker.required(),
        if tracker.is_complete() { "enabled" } else { "disabled" }
    );
    out
}

/// One-line feedback for a toggle; `item` and `category` are what the user typed
pub fn describe_outcome<T: Selectable>(
    tracker: &SelectionTracker<T>,
    outcome: ToggleOutcome,
    item: &str,
    category: &str,
) -> String {
    let catalog = tracker.catalog();
    match outcome {
        ToggleOutcome::Selected => format!("{} -> {}", item, category),
        ToggleOutcome::Deselected => format!("{} cleared", item),
        ToggleOutcome::Reassigned { previous } => {
            format!("{} moved from {} to {}", item, catalog.category(previous).label, category)
        }
        ToggleOutcome::Locked { holder } => {
            format!("{} is already taken by {}", category, catalog.key(holder))
        }
    }
}

/// Expanded view of one item: its summary, detail fields and current pick
pub fn render_details<T: Selectable>(tracker: &SelectionTracker<T>, item: ItemId) -> String {
    let catalog = tracker.catalog();
    let entry = catalog.item(item);
    let mut out = entry.summary();
    for (field, value) in entry.details() {
        let _ = write!(out, "\n  {:<12} {}", format!("{}:", field), value);
    }
    let picked = tracker
        .category_of(item)
        .map(|category| catalog.category(category).display.clone())
        .unwrap_or_else(|| "-".to_string());
    let _ = write!(out, "\n  {:<12} {}", "Picked:", picked);
    out
}

pub fn render_session<T: Selectable>(session: &PickSession<T>) -> String {
    match session.state() {
        ScreenState::Loading => "Loading...".to_string(),
        ScreenState::Failed { message } => format!("Oops, something went wrong: {}", message),
        ScreenState::Ready(tracker) => render_catalog(tracker),
    }
}
