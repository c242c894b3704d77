//! Structural elements: the building blocks of the geometry/model store

mod material;
mod member;
mod node;
mod section;

pub use material::Material;
pub use member::{Member, MemberReleases};
pub use node::Node;
pub use section::Section;
