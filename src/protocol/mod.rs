pub mod apa102;
pub mod bitbang;

pub use apa102::{build_pixel_words, write_frame};
