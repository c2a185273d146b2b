#![allow(dead_code)]

pub mod nagar_env;
pub mod stub_server;
