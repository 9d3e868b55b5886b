pub mod token_handler;
