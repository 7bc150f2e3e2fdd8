// Data models mapping 1:1 onto the relational schema

pub mod user;
pub mod posture_session;
pub mod exercise;
pub mod user_exercise;
pub mod progress;
pub mod feedback;
pub mod educational_content;
pub mod reminder;

pub use user::*;
pub use posture_session::*;
pub use exercise::*;
pub use user_exercise::*;
pub use progress::*;
pub use feedback::*;
pub use educational_content::*;
pub use reminder::*;
