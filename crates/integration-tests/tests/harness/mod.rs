#![allow(dead_code)]

pub mod config;
pub mod fake_engine;
pub mod server;
