pub mod evaluate;
pub mod parallel;
pub mod pipe;
pub mod simple;
pub mod tree;
pub mod word;
