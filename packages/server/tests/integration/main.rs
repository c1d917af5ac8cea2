mod common;

mod company;
mod landing;
