pub mod models;

pub use models::space::{ParkingSpace, SpaceType};
pub use models::ticket::Ticket;
pub use models::notification::{Notification, NotificationKind};
pub use models::events::NotificationPostedEvent;
