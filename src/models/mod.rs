pub mod user;
pub mod category;
pub mod tag;
pub mod habit;
pub mod habit_tag;
pub mod habit_log;
pub mod comment;

pub use user::User;
pub use category::Category;
pub use tag::Tag;
pub use habit::Habit;
pub use habit_tag::HabitTag;
pub use habit_log::HabitLog;
pub use comment::Comment;
