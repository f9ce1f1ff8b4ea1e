pub mod config;
pub mod exercise;
pub mod insight;
pub mod nutrition;
pub mod pr;
pub mod session;
pub mod set;

pub use exercise::Exercise;
pub use insight::Insight;
pub use pr::PersonalRecord;
pub use session::WorkoutSession;
pub use set::SetRecord;
