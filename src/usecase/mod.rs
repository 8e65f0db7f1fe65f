pub mod login_usecase;
pub mod register_account_usecase;
pub mod update_account_usecase;

#[cfg(test)]
pub(crate) mod mock_repository;
