pub mod effects;
pub mod navigation;
pub mod state;
pub mod update;

pub use effects::run_command;
pub use navigation::handle_key;
pub use state::{AppState, Command, LoginField, LoginForm, NoticeLevel, Screen, StatusNotice};
pub use update::update;
