pub mod print_request;
