mod log;
mod settings;
mod status;

pub use log::draw_log;
pub use settings::draw_settings;
pub use status::draw_status;
