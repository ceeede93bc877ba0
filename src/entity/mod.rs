pub mod ad;
pub mod ad_category;
pub mod ad_zone;
pub mod advertiser;
pub mod banner_ad;
pub mod click;
pub mod impression;
pub mod text_ad;
pub mod user;

pub use ad::AdKind;
