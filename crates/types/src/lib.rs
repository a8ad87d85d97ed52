pub mod ids;
pub mod node;

pub use ids::{Link, PageId, SubtreeKey};
pub use node::{Children, TreeNode};
