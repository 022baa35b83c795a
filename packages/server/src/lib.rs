// Garage Invoice - server core
//
// HTTP boundary for the listing-to-invoice pipeline: request shaping,
// error-to-status mapping, PDF composition, and delivery dispatch. The
// scraping pipeline itself lives in the `listing` crate.

pub mod config;
pub mod invoice;
pub mod server;

pub use config::Config;
