pub mod profile;

pub use profile::{Profile, PROFILE_HEADER};
