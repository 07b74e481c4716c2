pub mod agent_list;
pub mod footer;
pub mod header;
pub mod help_overlay;
pub mod input;
pub mod popup;
pub mod transcript;

pub use agent_list::render_agent_list;
pub use footer::render_footer;
pub use header::render_header;
pub use input::render_input;
pub use transcript::render_transcript;
