use std::path::PathBuf;

use crate::error::{Result, TicklistError};
use crate::filter::Filter;
use crate::ticklist::{StorageMode, Ticklist};

/// Everything the non-interactive CLI was asked to do.
#[derive(Debug, Default, Clone)]
pub struct CommandOptions {
    pub input: Vec<String>,
    pub add: bool,
    pub toggle: bool,
    pub delete: bool,
    pub edit: bool,
    pub clear: bool,
    pub list: bool,
    pub theme: bool,
    pub description: Option<String>,
    pub page: usize,
    pub ticklist_dir: Option<PathBuf>,
    pub ephemeral: bool,
}

impl CommandOptions {
    /// True when any action flag was given.
    pub fn has_action(&self) -> bool {
        self.add || self.toggle || self.delete || self.edit || self.clear || self.list || self.theme
    }
}

/// Execute CLI commands
pub fn run(options: CommandOptions) -> Result<()> {
    let mode = if options.ephemeral {
        StorageMode::Ephemeral
    } else {
        StorageMode::Local
    };
    let mut ticklist = Ticklist::new(options.ticklist_dir.as_deref(), mode)?;
    execute(&mut ticklist, &options)
}

/// Dispatch the first action flag present in `options` against `ticklist`.
pub fn execute(ticklist: &mut Ticklist, options: &CommandOptions) -> Result<()> {
    let description = options.description.as_deref();

    if options.add {
        return ticklist.create_todo(&options.input, description);
    }

    if options.toggle {
        return ticklist.toggle_todos(&options.input);
    }

    if options.delete {
        return ticklist.delete_todos(&options.input);
    }

    if options.edit {
        return ticklist.edit_todo(&options.input, description);
    }

    if options.clear {
        return ticklist.clear();
    }

    if options.theme {
        ticklist.display_theme();
        return Ok(());
    }

    // --list takes an optional filter word; plain `tl --cli` lists with the
    // configured default filter
    let filter = match options.input.first() {
        Some(word) if options.list => word
            .parse::<Filter>()
            .map_err(TicklistError::General)?,
        _ => ticklist.config().default_filter,
    };

    ticklist.display_list(filter, options.page.max(1))
}
