//! Command-line host for `wrap-core`
//!
//! # Usage
//!
//! ```bash
//! # List the commands derived from the configured wrappers
//! cargo run -p wrap-cli -- list
//!
//! # Toggle bold on "world" in "hello world" (chars 6..11)
//! cargo run -p wrap-cli -- toggle notes.md --command bold --from 6 --to 11
//!
//! # Same, addressed by 1-based line:column, printing instead of writing
//! cargo run -p wrap-cli -- toggle notes.md -c wrap-with-shortcut-bold --from 1:7 --to 1:12 --dry-run
//!
//! # Toggle an ad-hoc pair
//! cargo run -p wrap-cli -- wrap notes.md --start-tag '==' --end-tag '==' --from 0 --to 5
//!
//! # Edit the configured wrappers
//! cargo run -p wrap-cli -- tags add Highlight '<mark>' '</mark>'
//! ```
//!
//! Settings are read from `~/.config/wrap-toggle/data.json` unless `--settings` is given.

mod cli;
mod host;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{CliArgs, CliCommand, TagsCommand};
use host::{Outcome, Session, edit_file};
use wrap_core::{MENU_TITLE, TagPair, ToggleKind, menu_entries};
use wrap_settings::{JsonFileStore, SettingsStore};

fn main() -> Result<()> {
    logging::init();
    let args = CliArgs::parse();

    let store = match &args.settings {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::default_location().context("cannot locate settings file")?,
    };
    tracing::debug!("using settings at {}", store.path().display());

    let mut session = Session::load(store)?;

    match args.command {
        CliCommand::List => list(&session),
        CliCommand::Toggle {
            file,
            command,
            range,
        } => {
            let outcome = edit_file(&file, range.dry_run, |text| {
                session.toggle_text(text, &command, &range)
            })?;
            report(&outcome, range.dry_run);
        }
        CliCommand::Wrap {
            file,
            start_tag,
            end_tag,
            range,
        } => {
            let tags = TagPair::new(start_tag, end_tag);
            let outcome = edit_file(&file, range.dry_run, |text| {
                Ok(session.wrap_text(text, &tags, &range))
            })?;
            report(&outcome, range.dry_run);
        }
        CliCommand::Tags(command) => {
            edit_tags(&mut session, command)?;
            session.reload_commands();
            list(&session);
        }
    }

    Ok(())
}

fn list<S: SettingsStore>(session: &Session<S>) {
    for command in session.registry().commands() {
        println!("{:<36} {}", command.id, command.name);
    }

    let entries = menu_entries(session.wrapper_tags());
    if !entries.is_empty() {
        println!();
        println!("{MENU_TITLE}:");
        for entry in entries {
            println!("  {}", entry.title);
        }
    }
}

fn edit_tags<S: SettingsStore>(session: &mut Session<S>, command: TagsCommand) -> Result<()> {
    let settings = session.settings_mut();
    match command {
        TagsCommand::Add { name, start, end } => {
            let tag = settings.add_tag(&name, &start, &end)?;
            eprintln!("added '{}' as {}", tag.name, tag.id);
        }
        TagsCommand::Rename { id, name } => settings.rename_tag(&id, &name)?,
        TagsCommand::Set { id, start, end } => settings.set_tags(&id, &start, &end)?,
        TagsCommand::Move { from, to } => settings.move_tag(from, to)?,
        TagsCommand::Remove { id } => {
            let tag = settings.remove_tag(&id)?;
            eprintln!("removed '{}'", tag.name);
        }
    }
    Ok(())
}

fn report(outcome: &Outcome, dry_run: bool) {
    if dry_run {
        print!("{}", outcome.text);
        return;
    }
    match outcome.edit.as_ref().map(|edit| edit.kind) {
        Some(ToggleKind::Wrap) => eprintln!("wrapped"),
        Some(ToggleKind::Unwrap) => eprintln!("unwrapped"),
        None => eprintln!("both markers empty, nothing changed"),
    }
}
