pub mod ordered;
pub mod room;
pub mod room_file;

pub use ordered::OrderedMap;
pub use room::{FieldValue, NormalizedRoom, SectionValue, Sections};
pub use room_file::RoomFile;
