mod app;
pub(crate) mod browser;
pub(crate) mod effects;
pub(crate) mod logging;
pub(crate) mod ui;

pub(crate) use app::run_app;
