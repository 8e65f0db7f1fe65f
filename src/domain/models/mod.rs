pub mod account;
pub mod credential;
pub mod hasher_config;
pub mod record;
