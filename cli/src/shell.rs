// Interactive session: menu loop over an in-memory contact store
//
// The store is loaded once when the session opens and written back only when
// the user picks "save and exit". Errors from store operations are shown to
// the user and the loop carries on; only I/O failures on the terminal itself
// end the session early.

use crate::menu::MenuCommand;
use colored::*;
use contactbook_core::{ContactBookError, ContactField, ContactStorage, ContactStore};
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    /// Terminal: the store was handed to storage (successfully or not)
    ExitSave,
    /// Terminal: in-memory changes were dropped
    ExitDiscard,
}

pub struct Session<S, R, W> {
    storage: S,
    store: ContactStore,
    input: R,
    output: W,
    /// Set by create/edit/delete. Informational only: saving is unconditional.
    changed: bool,
}

impl<S, R, W> Session<S, R, W>
where
    S: ContactStorage,
    R: BufRead,
    W: Write,
{
    /// Load the store from `storage`. A failed load is reported and the
    /// session starts empty; the backing data is not touched.
    pub fn open(storage: S, input: R, mut output: W) -> io::Result<Self> {
        let store = match storage.load() {
            Ok(contacts) => ContactStore::from_contacts(contacts),
            Err(e) => {
                tracing::warn!("Failed to load contacts from {}: {}", storage.location(), e);
                writeln!(output, "{} Failed to load contacts: {}", "✗".red(), e)?;
                ContactStore::new()
            }
        };

        tracing::info!(
            "Session opened with {} contacts from {}",
            store.len(),
            storage.location()
        );

        Ok(Self {
            storage,
            store,
            input,
            output,
            changed: false,
        })
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Run the menu loop until one of the exit choices is made.
    /// End of input at the menu counts as exit without saving.
    pub fn run(&mut self) -> io::Result<SessionState> {
        let mut state = SessionState::Running;
        while state == SessionState::Running {
            state = self.step()?;
        }
        Ok(state)
    }

    fn step(&mut self) -> io::Result<SessionState> {
        self.render_menu()?;
        let choice = match read_prompt(
            &mut self.input,
            &mut self.output,
            &format!("{} ", "Choose an action (1-7):".bold()),
        )? {
            Some(choice) => choice,
            None => {
                writeln!(self.output)?;
                tracing::debug!("Input closed at menu prompt");
                return self.dispatch(Some(MenuCommand::DiscardAndExit));
            }
        };

        self.dispatch(MenuCommand::parse(&choice))
    }

    fn dispatch(&mut self, command: Option<MenuCommand>) -> io::Result<SessionState> {
        let Some(command) = command else {
            writeln!(self.output, "{}", "Invalid choice, try again.".yellow())?;
            return Ok(SessionState::Running);
        };

        tracing::debug!("Menu command: {:?}", command);
        if command.marks_changed() {
            self.changed = true;
        }

        match command {
            MenuCommand::List => self.cmd_list()?,
            MenuCommand::Create => self.cmd_create()?,
            MenuCommand::Find => self.cmd_find()?,
            MenuCommand::Edit => self.cmd_edit()?,
            MenuCommand::Delete => self.cmd_delete()?,
            MenuCommand::SaveAndExit => {
                self.cmd_save()?;
                writeln!(self.output, "Exiting.")?;
                return Ok(SessionState::ExitSave);
            }
            MenuCommand::DiscardAndExit => {
                writeln!(self.output, "Exiting without saving.")?;
                return Ok(SessionState::ExitDiscard);
            }
        }

        Ok(SessionState::Running)
    }

    fn render_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", "📞 Contact Book".bold())?;
        for command in MenuCommand::ALL {
            writeln!(self.output, "{}. {}", command.key(), command.label())?;
        }
        Ok(())
    }

    fn cmd_list(&mut self) -> io::Result<()> {
        for line in self.store.list_all() {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn cmd_create(&mut self) -> io::Result<()> {
        let name = self.ask("Name: ")?;
        let phone = self.ask("Phone: ")?;
        let comment = self.ask("Comment: ")?;

        let result = self.store.create(&name, &phone, &comment).map(|_| ());
        match result {
            Ok(()) => writeln!(self.output, "{} Contact created.", "✓".green()),
            Err(e) => self.report(&e),
        }
    }

    fn cmd_find(&mut self) -> io::Result<()> {
        let query = self.ask("Search (name, phone or comment): ")?;
        for line in self.store.find(&query).lines() {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn cmd_edit(&mut self) -> io::Result<()> {
        let id_input = self.ask("Contact ID to edit: ")?;

        let Self {
            store,
            input,
            output,
            ..
        } = self;
        let result = store.edit(&id_input, |contact, field| {
            if field == ContactField::Name {
                writeln!(*output, "Editing contact: {}", contact.name.bright_cyan())?;
            }
            let prompt = format!("{} [{}]: ", field.label(), contact.field(field));
            Ok(read_prompt(&mut *input, &mut *output, &prompt)?.unwrap_or_default())
        })
        .map(|_| ());

        match result {
            Ok(()) => writeln!(self.output, "{} Contact updated.", "✓".green()),
            Err(e) => self.report(&e),
        }
    }

    fn cmd_delete(&mut self) -> io::Result<()> {
        let id_input = self.ask("Contact ID to delete: ")?;
        match self.store.delete(&id_input) {
            Ok(_) => writeln!(self.output, "{} Contact deleted.", "✓".green()),
            Err(e) => self.report(&e),
        }
    }

    fn cmd_save(&mut self) -> io::Result<()> {
        match self.storage.save(self.store.contacts()) {
            Ok(()) => {
                tracing::info!(
                    "Saved {} contacts to {}",
                    self.store.len(),
                    self.storage.location()
                );
                writeln!(self.output, "{} Contacts saved.", "✓".green())
            }
            Err(e) => {
                tracing::warn!("Failed to save contacts: {}", e);
                writeln!(self.output, "{} Failed to save contacts: {}", "✗".red(), e)
            }
        }
    }

    /// Prompt for a line; end of input reads as an empty answer.
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        Ok(read_prompt(&mut self.input, &mut self.output, prompt)?.unwrap_or_default())
    }

    fn report(&mut self, error: &ContactBookError) -> io::Result<()> {
        if let ContactBookError::Io(e) = error {
            return Err(io::Error::new(e.kind(), e.to_string()));
        }
        writeln!(self.output, "{} {}", "✗".red(), error)
    }
}

/// Write `prompt`, then read one line without its line terminator.
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// garbled line is just another unrecognised answer.
/// Returns `None` at end of input.
fn read_prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    if buf.ends_with(b"\n") {
        buf.pop();
        if buf.ends_with(b"\r") {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}
