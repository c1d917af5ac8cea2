pub mod company;
pub mod landing;
