pub mod help_popup;
pub mod item_row;
pub mod status_bar;
pub mod todo_dialog;
