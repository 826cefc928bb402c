pub mod input;
pub mod layout;
pub mod quiz;
pub mod summary;

pub use input::draw_input;
pub use quiz::{draw_leave_confirmation, draw_quiz};
pub use summary::draw_summary;
