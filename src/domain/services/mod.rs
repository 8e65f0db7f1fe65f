pub mod credential_hasher;
pub mod lifecycle;
pub mod password_service;
