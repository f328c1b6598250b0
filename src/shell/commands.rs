//! shell::commands
//!
//! Command handlers for the interactive shell.
//!
//! # Architecture
//!
//! Each handler:
//! 1. Validates command-specific arguments
//! 2. Calls the session to perform the operation
//! 3. Formats and displays output
//!
//! Handlers do NOT mutate the tree directly; every change flows through
//! the session and the engine's validated operations. Destructive commands
//! (`remove --all`, discarding unsaved changes) obtain a literal `YES`
//! confirmation before calling the engine, honoring
//! [`REMOVE_ALL_REQUIRES_CONFIRMATION`].

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};

use crate::core::edit::REMOVE_ALL_REQUIRES_CONFIRMATION;
use crate::session::Session;
use crate::store::FileOffsetStore;
use crate::ui::{output, prompts, render};

use super::{Flow, Shell};

const HELP: &str = "\
Commands

  open <file>
      Open a document. The stored offset for that file is applied.

  save
      Validate the outline and write it back to the current file.

  saveas <file>
      Save to a new file and switch the session to it.

  list [--paths]
      Show the outline tree with ids. Pages display as p. logical/actual.
      With --paths, [#k] badges show per-level indices for building paths.

  add \"<title>\" <page> [--parent <id|path>] [--index <n>]
      Add a bookmark at a logical page. Index is 0-based.

  grp \"<name>\" [--parent <id|path>] [--index <n>]
      Add a group (folder) with no page.

  remove <id|path>
  remove --all
      Remove a node (with its subtree), or everything. --all asks for
      confirmation.

  move <id|path> [--to <id|path>] [--index <n>]
      Move a node under a new parent (root if --to is omitted).

  rename <id|path> \"<new title>\"
      Rename a node without changing its page or position.

  setpage <id|path> <page>
      Set a logical page, turning the node into a bookmark.

  clearpage <id|path>
      Clear the page, turning the node into a group.

  offset <n> | offset set <n> | offset clear
      Per-document shift applied to all bookmarks: actual = logical + offset.

  close
      Close the current document (asks before discarding unsaved changes).

  quit / exit
      Leave the shell (asks before discarding unsaved changes).

  help
      Show this help.

References: n3 is an id, 1>3>2 is a path, and 0 / root / / name the top
level as a destination.";

/// Dispatch one tokenized command line.
pub fn dispatch(shell: &mut Shell, input: &mut dyn BufRead, tokens: &[String]) -> Result<Flow> {
    let (command, args) = tokens.split_first().expect("tokens are non-empty");
    match command.as_str() {
        "quit" | "exit" => {
            if confirm_discard(shell, input)? {
                Ok(Flow::Exit)
            } else {
                output::print("Aborted", shell.verbosity);
                Ok(Flow::Continue)
            }
        }
        "help" => {
            output::print(output::indented(HELP), shell.verbosity);
            Ok(Flow::Continue)
        }
        "open" => open(shell, args).map(|_| Flow::Continue),
        "save" => save(shell).map(|_| Flow::Continue),
        "saveas" => saveas(shell, args).map(|_| Flow::Continue),
        "list" => list(shell, args).map(|_| Flow::Continue),
        "add" => add(shell, args).map(|_| Flow::Continue),
        "grp" => grp(shell, args).map(|_| Flow::Continue),
        "remove" => remove(shell, input, args).map(|_| Flow::Continue),
        "move" => move_node(shell, args).map(|_| Flow::Continue),
        "rename" => rename(shell, args).map(|_| Flow::Continue),
        "setpage" => setpage(shell, args).map(|_| Flow::Continue),
        "clearpage" => clearpage(shell, args).map(|_| Flow::Continue),
        "offset" => offset(shell, args).map(|_| Flow::Continue),
        "close" => close(shell, input).map(|_| Flow::Continue),
        other => {
            output::error(format!("unknown command: {other} (try 'help')"));
            Ok(Flow::Continue)
        }
    }
}

/// Open a document, replacing any current session.
pub fn open(shell: &mut Shell, args: &[String]) -> Result<()> {
    let [file] = args else {
        bail!("usage: open <file>");
    };
    let path = PathBuf::from(file);
    let store = Box::new(FileOffsetStore::new()?);
    let session = Session::open(&path, store)?;
    output::debug(
        format!(
            "loaded offset {} for {}",
            session.offset(),
            session.path().display()
        ),
        shell.verbosity,
    );
    shell.session = Some(session);
    output::success(format!("Opened {file}"), shell.verbosity);
    Ok(())
}

fn save(shell: &mut Shell) -> Result<()> {
    let verbosity = shell.verbosity;
    let session = require_session(shell)?;
    let written = session.save()?;
    output::debug(format!("wrote {written} destinations"), verbosity);
    output::success("Saved", verbosity);
    Ok(())
}

fn saveas(shell: &mut Shell, args: &[String]) -> Result<()> {
    let [file] = args else {
        bail!("usage: saveas <file>");
    };
    let verbosity = shell.verbosity;
    let path = PathBuf::from(file);
    let session = require_session(shell)?;
    session.save_as(&path)?;
    output::success(format!("Saved as {file}"), verbosity);
    Ok(())
}

fn list(shell: &mut Shell, args: &[String]) -> Result<()> {
    let show_paths = match args {
        [] => false,
        [flag] if flag == "--paths" => true,
        _ => bail!("usage: list [--paths]"),
    };
    let verbosity = shell.verbosity;
    let session = require_session(shell)?;
    output::print(format!("Offset: {}\n", session.offset()), verbosity);
    output::print(render::render_tree(session, show_paths), verbosity);
    Ok(())
}

fn add(shell: &mut Shell, args: &[String]) -> Result<()> {
    const USAGE: &str = "usage: add \"<title>\" <page> [--parent <id|path>] [--index <n>]";
    let (title, rest) = args.split_first().ok_or_else(|| anyhow!(USAGE))?;
    let (page, rest) = rest.split_first().ok_or_else(|| anyhow!(USAGE))?;
    let page: u32 = page
        .parse()
        .map_err(|_| anyhow!("page must be a positive integer"))?;
    let (parent, index) = parse_placement(rest, USAGE)?;

    let verbosity = shell.verbosity;
    let session = require_session(shell)?;
    let id = session.add(title, page, parent.as_deref(), index)?;
    output::success(format!("Added [{id}]"), verbosity);
    Ok(())
}

fn grp(shell: &mut Shell, args: &[String]) -> Result<()> {
    const USAGE: &str = "usage: grp \"<name>\" [--parent <id|path>] [--index <n>]";
    let (name, rest) = args.split_first().ok_or_else(|| anyhow!(USAGE))?;
    let (parent, index) = parse_placement(rest, USAGE)?;

    let verbosity = shell.verbosity;
    let session = require_session(shell)?;
    let id = session.add_group(name, parent.as_deref(), index)?;
    output::success(format!("Group added [{id}]"), verbosity);
    Ok(())
}

fn remove(shell: &mut Shell, input: &mut dyn BufRead, args: &[String]) -> Result<()> {
    let verbosity = shell.verbosity;
    let interactive = shell.interactive;
    match args {
        [token] if token != "--all" => {
            let session = require_session(shell)?;
            session.remove(token)?;
            output::success("Removed", verbosity);
            Ok(())
        }
        [flag] if flag == "--all" => {
            require_session(shell)?;
            let confirmed = if REMOVE_ALL_REQUIRES_CONFIRMATION {
                prompts::confirm_destructive(
                    "This will delete ALL outline entries.",
                    interactive,
                    input,
                )?
            } else {
                true
            };
            if confirmed {
                require_session(shell)?.remove_all();
                output::success("All outline entries cleared", verbosity);
            } else {
                output::print("Aborted", verbosity);
            }
            Ok(())
        }
        _ => bail!("usage: remove <id|path>  |  remove --all"),
    }
}

fn move_node(shell: &mut Shell, args: &[String]) -> Result<()> {
    const USAGE: &str = "usage: move <id|path> [--to <id|path>] [--index <n>]";
    let (token, rest) = args.split_first().ok_or_else(|| anyhow!(USAGE))?;

    let mut to: Option<String> = None;
    let mut index: Option<usize> = None;
    let mut rest = rest.iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--to" => {
                to = Some(rest.next().ok_or_else(|| anyhow!("--to needs a value"))?.clone());
            }
            "--index" => {
                index = Some(parse_index(rest.next())?);
            }
            other => bail!("unknown option {other}\n{USAGE}"),
        }
    }

    let verbosity = shell.verbosity;
    let session = require_session(shell)?;
    let new_path = session.move_node(token, to.as_deref(), index)?;
    output::success(format!("Moved to {new_path}"), verbosity);
    Ok(())
}

fn rename(shell: &mut Shell, args: &[String]) -> Result<()> {
    let [token, new_title] = args else {
        bail!("usage: rename <id|path> \"<new title>\"");
    };
    let verbosity = shell.verbosity;
    let session = require_session(shell)?;
    session.rename(token, new_title)?;
    output::success("Renamed", verbosity);
    Ok(())
}

fn setpage(shell: &mut Shell, args: &[String]) -> Result<()> {
    let [token, page] = args else {
        bail!("usage: setpage <id|path> <page>");
    };
    let page: u32 = page
        .parse()
        .map_err(|_| anyhow!("page must be a positive integer"))?;
    let verbosity = shell.verbosity;
    let session = require_session(shell)?;
    session.set_page(token, page)?;
    output::success("Page set", verbosity);
    Ok(())
}

fn clearpage(shell: &mut Shell, args: &[String]) -> Result<()> {
    let [token] = args else {
        bail!("usage: clearpage <id|path>");
    };
    let verbosity = shell.verbosity;
    let session = require_session(shell)?;
    session.clear_page(token)?;
    output::success("Page cleared", verbosity);
    Ok(())
}

fn offset(shell: &mut Shell, args: &[String]) -> Result<()> {
    const USAGE: &str = "usage: offset <n>  |  offset set <n>  |  offset clear";
    let verbosity = shell.verbosity;
    match args {
        // "offset clear", or the "offset 2" shorthand
        [word] => {
            if word == "clear" {
                let session = require_session(shell)?;
                session.clear_offset()?;
                output::success("Offset cleared", verbosity);
                Ok(())
            } else if let Ok(value) = word.parse::<i64>() {
                let session = require_session(shell)?;
                session.set_offset(value)?;
                output::success(format!("Offset set to {value}"), verbosity);
                Ok(())
            } else {
                bail!(USAGE)
            }
        }
        [word, value] if word == "set" => {
            let value: i64 = value
                .parse()
                .map_err(|_| anyhow!("offset must be an integer"))?;
            let session = require_session(shell)?;
            session.set_offset(value)?;
            output::success(format!("Offset set to {value}"), verbosity);
            Ok(())
        }
        _ => bail!(USAGE),
    }
}

fn close(shell: &mut Shell, input: &mut dyn BufRead) -> Result<()> {
    let verbosity = shell.verbosity;
    if shell.session.is_none() {
        bail!("no document open");
    }
    if confirm_discard(shell, input)? {
        shell.session = None;
        output::success("Closed current file", verbosity);
    } else {
        output::print("Aborted", verbosity);
    }
    Ok(())
}

/// Ask before discarding unsaved changes. Clean sessions (or no session)
/// pass through silently.
fn confirm_discard(shell: &mut Shell, input: &mut dyn BufRead) -> Result<bool> {
    let dirty = shell.session.as_ref().is_some_and(Session::dirty);
    if !dirty {
        return Ok(true);
    }
    Ok(prompts::confirm_destructive(
        "Unsaved changes will be discarded.",
        shell.interactive,
        input,
    )?)
}

fn require_session(shell: &mut Shell) -> Result<&mut Session> {
    shell
        .session
        .as_mut()
        .ok_or_else(|| anyhow!("no document open (use: open <file>)"))
}

/// Parse the shared `--parent <token>` / `--index <n>` tail.
fn parse_placement(args: &[String], usage: &str) -> Result<(Option<String>, Option<usize>)> {
    let mut parent: Option<String> = None;
    let mut index: Option<usize> = None;
    let mut args = args.iter();
    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--parent" | "-p" => {
                parent = Some(
                    args.next()
                        .ok_or_else(|| anyhow!("--parent needs a value"))?
                        .clone(),
                );
            }
            "--index" | "-i" => {
                index = Some(parse_index(args.next())?);
            }
            other => bail!("unknown option {other}\n{usage}"),
        }
    }
    Ok((parent, index))
}

fn parse_index(value: Option<&String>) -> Result<usize> {
    value
        .ok_or_else(|| anyhow!("--index needs an integer"))?
        .parse()
        .map_err(|_| anyhow!("--index needs a non-negative integer"))
}
