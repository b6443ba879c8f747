//! Collections that keep their items in comparator order, built on an arena-backed red black
//! tree.

pub mod arena;
pub mod compare;
pub mod red_black_tree;
