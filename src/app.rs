mod app_events;
mod app_render;
mod app_state;
mod input_state;

pub use app_state::{App, Focus};
pub use input_state::InputState;
