pub mod photo;
pub mod session;
pub mod tag;

pub use photo::{NewPhoto, Permissions, Photo, PhotoPage};
pub use session::{Session, SessionInfo};
pub use tag::Tag;
