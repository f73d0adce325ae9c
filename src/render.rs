use colored::Colorize;

use crate::config::Config;
use crate::error::TicklistError;
use crate::filter::Filter;
use crate::models::Todo;
use crate::pagination::Paginator;
use crate::store::Stats;
use crate::theme::Theme;

pub struct Render {
    config: Config,
}

fn join_ids(ids: &[String]) -> String {
    ids.join(", ")
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "todo"
    } else {
        "todos"
    }
}

impl Render {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn build_prefix(&self, todo: &Todo) -> String {
        format!("  {}", todo.short_id().dimmed())
    }

    fn get_icon(&self, todo: &Todo) -> String {
        if todo.completed {
            "✔".green().to_string()
        } else {
            "☐".magenta().to_string()
        }
    }

    fn build_message(&self, todo: &Todo) -> String {
        if todo.completed {
            todo.title.dimmed().strikethrough().to_string()
        } else {
            todo.title.clone()
        }
    }

    fn display_todo(&self, todo: &Todo) {
        let suffix = todo
            .created()
            .map(|c| c.dimmed().to_string())
            .unwrap_or_default();
        println!(
            "{} {} {} {}",
            self.build_prefix(todo),
            self.get_icon(todo),
            self.build_message(todo),
            suffix
        );

        if let Some(description) = &todo.description {
            for line in description.lines() {
                println!("             {}", line.dimmed());
            }
        }
    }

    /// Print one page of `todos` (already filtered) under a header naming the
    /// filter and page.
    pub fn display_page(&self, todos: &[&Todo], filter: Filter, pager: &Paginator) {
        let total_pages = pager.total_pages(todos.len());
        println!(
            "\n {} {}",
            filter.display_name().underline(),
            format!("[page {} of {}]", pager.current(), total_pages).dimmed()
        );

        if todos.is_empty() {
            println!("  {}", "Nothing here.".dimmed());
            return;
        }

        for todo in &todos[pager.page_range(todos.len())] {
            self.display_todo(todo);
        }
    }

    pub fn display_stats(&self, stats: &Stats) {
        if !self.config.display_progress_overview {
            return;
        }

        if stats.total == 0 {
            println!("\n  No todos yet. Add one with `tl --add <title>`\n");
            return;
        }

        let percent_str = if stats.percent >= 75 {
            format!("{}%", stats.percent).green().to_string()
        } else if stats.percent >= 50 {
            format!("{}%", stats.percent).yellow().to_string()
        } else {
            format!("{}%", stats.percent)
        };

        let status = format!(
            "{} {} {} {} {}",
            stats.completed.to_string().green(),
            "done".dimmed(),
            "·".dimmed(),
            stats.active.to_string().magenta(),
            "active".dimmed(),
        );

        println!(
            "\n  {}",
            format!("{} of all todos complete.", percent_str).dimmed()
        );
        println!("  {}\n", status);
    }

    pub fn success_create(&self, todo: &Todo) {
        println!(
            "\n {} Created todo: {}",
            "✔".green(),
            todo.short_id().dimmed()
        );
    }

    pub fn success_edit(&self, id: &str) {
        println!("\n {} Updated todo: {}", "✔".green(), id.dimmed());
    }

    pub fn unchanged_edit(&self, id: &str) {
        println!("\n {} Nothing to update for: {}", "●".blue(), id.dimmed());
    }

    pub fn mark_complete(&self, ids: &[String]) {
        if ids.is_empty() {
            return;
        }
        println!(
            "\n {} Checked {}: {}",
            "✔".green(),
            plural(ids.len()),
            join_ids(ids).dimmed()
        );
    }

    pub fn mark_incomplete(&self, ids: &[String]) {
        if ids.is_empty() {
            return;
        }
        println!(
            "\n {} Unchecked {}: {}",
            "✔".green(),
            plural(ids.len()),
            join_ids(ids).dimmed()
        );
    }

    pub fn success_delete(&self, ids: &[String]) {
        if ids.is_empty() {
            return;
        }
        println!(
            "\n {} Deleted {}: {}",
            "✔".green(),
            plural(ids.len()),
            join_ids(ids).dimmed()
        );
    }

    pub fn success_clear(&self, count: usize) {
        if count == 0 {
            println!("\n {} No completed todos to clear", "●".blue());
            return;
        }
        println!(
            "\n {} Cleared {} completed {}",
            "✔".green(),
            count,
            plural(count)
        );
    }

    pub fn display_theme(&self, theme: Theme) {
        println!("\n  Theme: {}\n", theme.label());
    }
}

/// Print an error the way every other CLI message is printed.
pub fn print_error(err: &TicklistError) {
    match err {
        TicklistError::UnknownId(id) => eprintln!(
            "\n {} Unable to find todo with id: {}",
            "✖".red(),
            id.dimmed()
        ),
        TicklistError::AmbiguousId(id) => eprintln!(
            "\n {} More than one todo starts with: {}",
            "✖".red(),
            id.dimmed()
        ),
        TicklistError::InvalidDirectory(path) => eprintln!(
            "\n {} Custom data directory was not found on your system: {}",
            "✖".red(),
            path.red()
        ),
        TicklistError::MissingDirValue => eprintln!(
            "\n {} Please provide a value for --dir or remove the flag.",
            "✖".red()
        ),
        other => eprintln!("\n {} {}", "✖".red(), other),
    }
}
