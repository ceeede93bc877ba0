pub mod ad;
pub mod advertiser;
pub mod category;
#[cfg(test)]
pub mod test_utils;
pub mod tracking;
pub mod user;
pub mod verify;
pub mod zone;

pub use ad::{Ad, AdWithCreative, Creative, NewAd};
pub use advertiser::Advertiser;
pub use category::Category;
pub use tracking::{AdStats, Tracking};
pub use user::User;
pub use verify::UrlVerifier;
pub use zone::Zone;
