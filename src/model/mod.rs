pub mod bookmark;
pub mod ids;
pub mod message;
pub mod theme;
pub mod user;

pub use bookmark::{Profile, SessionBookmark};
pub use ids::{AgentName, SessionId, UserId};
pub use message::{Message, Role, Transcript};
pub use theme::Theme;
pub use user::AuthenticatedUser;
