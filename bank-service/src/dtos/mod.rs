pub mod accounts;

pub use accounts::{
    CreateAccountRequest, DepositRequest, MessageResponse, UpdateAccountRequest, WithdrawRequest,
};
