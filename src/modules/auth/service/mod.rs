pub mod code;
pub mod firebase;
pub mod jwt;
pub mod password;
pub mod session;
