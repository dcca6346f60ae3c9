//! Terminal front-end: a login gate, a main menu, and one screen each for
//! sales, purchases, and reports.
mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
