#![forbid(unsafe_code)]
//! An ordered map and set over a plain binary search tree. See the map
//! and set modules for details.

pub(crate) mod bst;
pub mod map;
pub mod set;

#[cfg(test)]
mod tests;
