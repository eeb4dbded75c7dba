//! Command implementations

mod apply;
mod list;
mod switch;

pub use apply::run_apply;
pub use list::run_list;
pub use switch::run_switch;

use colored::Colorize;
use jswitch_tools::{Notice, NoticeLevel};

/// Print the notices from an update pass.
pub(crate) fn print_notices(notices: &[Notice]) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Info => println!("{} {}", "info:".green().bold(), notice.message),
            NoticeLevel::Warning => {
                eprintln!("{} {}", "warning:".yellow().bold(), notice.message)
            }
        }
    }
}
