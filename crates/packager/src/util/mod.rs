pub mod counter;
pub mod path;
pub mod time;

pub use counter::IdCounter;
