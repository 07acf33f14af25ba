pub mod push_token;
