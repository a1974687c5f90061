pub mod kd_tree;
pub mod linked_list;
pub mod segment_tree;
pub mod union_find;
