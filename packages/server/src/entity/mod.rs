pub mod brand;
pub mod category;
pub mod home_content;
pub mod media;
