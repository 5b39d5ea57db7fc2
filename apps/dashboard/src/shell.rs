//! Line-oriented client directory shell.
//!
//! Each input line is one event; it runs to completion, then pending
//! toasts are flushed below its output.

use std::io::{self, BufRead, Write};

use directory_core::{
    actions::{CLIENTS_ROUTE, CREATE_CLIENT_ROUTE},
    ActionOutcome, ChangeSink, DirectoryController, RowAction, ToastQueue,
};
use shared::{
    domain::{ClientId, NewClient},
    error::DirectoryResult,
};

use crate::render;

const PROMPT: &str = "clients> ";

const HELP: &str = "\
commands:
  list              show the current view
  search <text>     filter by name, email or company
  clear             remove the filter
  open <id>         view a client profile
  edit <id>         open the edit route for a client
  delete <id>       ask to delete a client
  confirm           delete the client awaiting confirmation
  cancel            keep the client awaiting confirmation
  help              show this message
  quit              leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Search(String),
    Clear,
    Open(ClientId),
    Edit(ClientId),
    Delete(ClientId),
    Confirm,
    Cancel,
    Help,
    Quit,
}

impl ShellCommand {
    /// `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => ShellCommand::List,
            "search" | "find" => ShellCommand::Search(rest.to_string()),
            "clear" => ShellCommand::Clear,
            "open" | "view" => ShellCommand::Open(required_id(verb, rest)?),
            "edit" => ShellCommand::Edit(required_id(verb, rest)?),
            "delete" | "rm" => ShellCommand::Delete(required_id(verb, rest)?),
            "confirm" | "y" | "yes" => ShellCommand::Confirm,
            "cancel" | "n" | "no" => ShellCommand::Cancel,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            other => return Err(format!("unknown command '{other}'; try 'help'")),
        };
        Ok(Some(command))
    }
}

fn required_id(verb: &str, rest: &str) -> Result<ClientId, String> {
    if rest.is_empty() {
        Err(format!("'{verb}' needs a client id"))
    } else {
        Ok(ClientId::from(rest))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<S: ChangeSink> {
    directory: DirectoryController<ToastQueue, S>,
    toasts: ToastQueue,
}

impl<S: ChangeSink> Shell<S> {
    /// `toasts` must be the queue the directory notifies into.
    pub fn new(directory: DirectoryController<ToastQueue, S>, toasts: ToastQueue) -> Self {
        Self { directory, toasts }
    }

    pub fn directory(&self) -> &DirectoryController<ToastQueue, S> {
        &self.directory
    }

    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            let flow = match ShellCommand::parse(&line) {
                Ok(Some(command)) => self.execute(command, out)?,
                Ok(None) => Flow::Continue,
                Err(message) => {
                    writeln!(out, "{message}")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                return Ok(());
            }
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }
        writeln!(out)
    }

    pub fn execute(&mut self, command: ShellCommand, out: &mut impl Write) -> io::Result<Flow> {
        let flow = match command {
            ShellCommand::List => {
                self.navigate(CLIENTS_ROUTE, out)?;
                Flow::Continue
            }
            ShellCommand::Search(text) => {
                self.directory.set_query(text);
                self.navigate(CLIENTS_ROUTE, out)?;
                Flow::Continue
            }
            ShellCommand::Clear => {
                self.directory.set_query("");
                self.navigate(CLIENTS_ROUTE, out)?;
                Flow::Continue
            }
            ShellCommand::Open(id) => {
                self.row_action(&id, RowAction::ViewProfile, out)?;
                Flow::Continue
            }
            ShellCommand::Edit(id) => {
                self.row_action(&id, RowAction::EditClient, out)?;
                Flow::Continue
            }
            ShellCommand::Delete(id) => {
                self.row_action(&id, RowAction::DeleteClient, out)?;
                Flow::Continue
            }
            ShellCommand::Confirm => {
                match self.directory.confirm_delete() {
                    Some(_) => self.navigate(CLIENTS_ROUTE, out)?,
                    None => writeln!(out, "Nothing is awaiting confirmation.")?,
                }
                Flow::Continue
            }
            ShellCommand::Cancel => {
                if !self.directory.cancel_delete() {
                    writeln!(out, "Nothing is awaiting confirmation.")?;
                }
                Flow::Continue
            }
            ShellCommand::Help => {
                writeln!(out, "{HELP}")?;
                Flow::Continue
            }
            ShellCommand::Quit => Flow::Quit,
        };

        self.flush_toasts(out)?;
        Ok(flow)
    }

    /// Submits a finished creation form. A duplicate id is returned to the
    /// caller untouched.
    pub fn submit_new_client(
        &mut self,
        new: NewClient,
        out: &mut impl Write,
    ) -> io::Result<DirectoryResult<ClientId>> {
        let result = self.directory.add_client(new);
        if result.is_ok() {
            self.flush_toasts(out)?;
            self.navigate(CLIENTS_ROUTE, out)?;
        }
        Ok(result)
    }

    /// Requests deletion of `id` and confirms that same request in one go,
    /// for callers that collected the confirmation up front.
    pub fn delete_confirmed(&mut self, id: &ClientId, out: &mut impl Write) -> io::Result<bool> {
        let ActionOutcome::ConfirmationRequested(ticket) =
            self.directory.dispatch(id, RowAction::DeleteClient)
        else {
            writeln!(out, "No client with id '{id}'.")?;
            return Ok(false);
        };

        let deleted = self.directory.confirm_delete_ticket(ticket).is_some();
        self.flush_toasts(out)?;
        self.navigate(CLIENTS_ROUTE, out)?;
        Ok(deleted)
    }

    /// Shows the confirmation prompt for `id` without confirming. Returns
    /// whether a deletion is now awaiting confirmation.
    pub fn request_delete(&mut self, id: &ClientId, out: &mut impl Write) -> io::Result<bool> {
        let outcome = self.row_action(id, RowAction::DeleteClient, out)?;
        self.flush_toasts(out)?;
        Ok(matches!(outcome, ActionOutcome::ConfirmationRequested(_)))
    }

    fn row_action(
        &mut self,
        id: &ClientId,
        action: RowAction,
        out: &mut impl Write,
    ) -> io::Result<ActionOutcome> {
        let outcome = self.directory.dispatch(id, action);
        match &outcome {
            ActionOutcome::Navigate(path) => self.navigate(path, out)?,
            ActionOutcome::ConfirmationRequested(_) => {
                render::write_confirmation(out, self.directory.get(id).as_ref())?
            }
            ActionOutcome::UnknownClient => writeln!(out, "No client with id '{id}'.")?,
        }
        Ok(outcome)
    }

    /// Minimal routing shell for the paths the directory can request.
    pub fn navigate(&self, path: &str, out: &mut impl Write) -> io::Result<()> {
        if path == CLIENTS_ROUTE {
            return render::write_table(out, &self.directory.snapshot());
        }
        if path == CREATE_CLIENT_ROUTE {
            return writeln!(out, "Use the 'add' subcommand to create a client.");
        }

        let Some(rest) = path
            .strip_prefix(CLIENTS_ROUTE)
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            return writeln!(out, "No view for '{path}'.");
        };

        match rest.split_once('/') {
            None => match self.directory.get(&ClientId::from(rest)) {
                Some(record) => {
                    render::write_profile(out, &record)?;
                    render::write_row_actions(out, &record.id)
                }
                None => writeln!(out, "No client with id '{rest}'."),
            },
            Some((id, "edit")) => match self.directory.get(&ClientId::from(id)) {
                Some(record) => writeln!(
                    out,
                    "Editing {} happens in the client form ({path}).",
                    record.name
                ),
                None => writeln!(out, "No client with id '{id}'."),
            },
            Some(_) => writeln!(out, "No view for '{path}'."),
        }
    }

    fn flush_toasts(&self, out: &mut impl Write) -> io::Result<()> {
        for toast in self.toasts.drain() {
            render::write_toast(out, &toast)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
