pub mod health;
pub mod print_request;
