// HTTP routes
pub mod health;
pub mod invoice;
pub mod send_email;

pub use health::*;
pub use invoice::*;
pub use send_email::*;
