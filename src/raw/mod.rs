mod arena;
mod handle;
pub(crate) mod navigation;
mod node;
mod raw_avl_tree;

pub(crate) use arena::Arena;
pub(crate) use node::{LinkHandle, LinkNode, NodeHandle, Side};
pub(crate) use raw_avl_tree::{RawAvlTree, SearchResult};
