#![allow(dead_code)]

pub mod kits;
pub mod kitshelf_env;
pub mod wav;
