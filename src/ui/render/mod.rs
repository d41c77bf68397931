mod all;
mod entry;
mod footer;
mod list;
mod log;
mod modal;
mod status;

use self::log::log;
use super::Frame;
use entry::entry;
use footer::footer;
use list::list;
use modal::modal;
use status::status;

pub use all::all as render;
