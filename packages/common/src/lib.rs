pub mod company;
pub mod config;
pub mod error;
pub mod hours;
pub mod image;
pub mod landing;
pub mod link;
pub mod link_list;
pub mod nullable;
pub mod product;
pub mod profile;
pub mod review;
pub mod search;
pub mod sync;
pub mod theme;

pub use company::Company;
pub use error::ValidationError;
pub use link::{LinkItem, LinkKind};
pub use link_list::LinkList;
pub use sync::{CrudList, Identified, Record};
