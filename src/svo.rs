//! Main module for svo library functionality

pub mod fixtures;
pub mod formats;
pub mod lexicon;
pub mod lexing;
pub mod parsing;
pub mod testing;
pub mod trace;
pub mod tree;
