use std::path::PathBuf;
use std::process;

use clap::Parser;

use ticklist::commands::{self, CommandOptions};
use ticklist::logging;
use ticklist::render::print_error;
use ticklist::tui;

const HELP_TEXT: &str = r#"
  Usage
    $ tl [<options> ...]

    Options
        none             Open the interactive todo list
      --add, -a          Create todo
      --check, -c        Check/uncheck todo (alias --toggle)
      --clear            Delete all completed todos
      --delete, -d       Delete todo
      --description, -D  Description for --add / --edit
      --dir              Define a custom data directory
      --edit, -e         Edit todo title
      --ephemeral        Keep todos in memory only
      --help, -h         Display help message
      --list, -l         List todos: all, active or completed
      --page, -p         Page of the list to show
      --theme            Show the configured theme
      --version, -V      Display installed version

    Examples
      $ tl
      $ tl --add Buy milk
      $ tl --add Call the plumber -D "Ask about the kitchen sink"
      $ tl --check 3f2a9c1e
      $ tl --edit 3f2a Buy oat milk
      $ tl --delete 3f2a 81bc
      $ tl --list active --page 2
      $ tl --clear
"#;

#[derive(Parser)]
#[command(
    name = "tl",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small todo list for the terminal",
    after_help = HELP_TEXT
)]
struct Cli {
    /// Input arguments (todo title, ids, filter)
    input: Vec<String>,

    /// Create todo
    #[arg(short = 'a', long)]
    add: bool,

    /// Check/uncheck todo
    #[arg(short = 'c', long = "check", visible_alias = "toggle")]
    check: bool,

    /// Delete all completed todos
    #[arg(long)]
    clear: bool,

    /// Delete todo
    #[arg(short = 'd', long)]
    delete: bool,

    /// Description for --add / --edit
    #[arg(short = 'D', long, value_name = "TEXT")]
    description: Option<String>,

    /// Edit todo title
    #[arg(short = 'e', long)]
    edit: bool,

    /// List todos: all, active or completed
    #[arg(short = 'l', long)]
    list: bool,

    /// Page of the list to show
    #[arg(short = 'p', long, default_value_t = 1)]
    page: usize,

    /// Show the configured theme
    #[arg(long)]
    theme: bool,

    /// Define a custom data directory
    #[arg(long = "dir", value_name = "PATH")]
    ticklist_dir: Option<PathBuf>,

    /// Keep todos in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Run in CLI mode (non-interactive)
    #[arg(long)]
    cli: bool,
}

impl From<Cli> for CommandOptions {
    fn from(cli: Cli) -> Self {
        CommandOptions {
            input: cli.input,
            add: cli.add,
            toggle: cli.check,
            delete: cli.delete,
            edit: cli.edit,
            clear: cli.clear,
            list: cli.list,
            theme: cli.theme,
            description: cli.description,
            page: cli.page,
            ticklist_dir: cli.ticklist_dir,
            ephemeral: cli.ephemeral,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let force_cli = cli.cli;
    let options = CommandOptions::from(cli);

    // Run TUI if: no action flags, no CLI flag, and no input
    let run_tui = !force_cli && !options.has_action() && options.input.is_empty();

    if run_tui {
        if let Err(e) = tui::run(options.ticklist_dir.as_deref(), options.ephemeral) {
            eprintln!("TUI error: {}", e);
            process::exit(1);
        }
    } else {
        logging::init_stderr();

        if let Err(e) = commands::run(options) {
            print_error(&e);
            process::exit(1);
        }
    }
}
