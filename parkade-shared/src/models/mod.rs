pub mod space;
pub mod ticket;
pub mod notification;
pub mod events;
