pub(crate) mod constants;
pub(crate) mod input;
pub(crate) mod layout;
pub(crate) mod render;
mod ui_state;

pub(crate) use ui_state::{Focus, UiState};
