//! Database operations for the `listings` table.

mod read;
mod types;

pub use read::{count_active_geo_listings, list_active_geo_listings};
pub use types::ListingRow;
