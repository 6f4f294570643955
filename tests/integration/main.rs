#[path = "../common/mod.rs"]
mod common;

mod scene_tests;
