pub mod booking;
pub mod item;
pub mod user;

pub use booking::{Booking, BookingStatus, StateFilter};
pub use item::Item;
pub use user::User;
