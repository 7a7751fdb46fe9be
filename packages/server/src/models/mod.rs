pub mod brand;
pub mod category;
pub mod content;
pub mod media;
pub mod shared;
