pub mod structs;

pub use structs::{Fingerprint, ResultCache};
