//! Load types and load combinations

mod load_case;
mod load_combo;
mod member_load;
mod node_load;

pub use load_case::LoadCase;
pub use load_combo::LoadCombination;
pub use member_load::MemberLoad;
pub use node_load::NodeLoad;
