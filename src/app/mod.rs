mod state;

pub use state::{Action, App, EntryKind};
