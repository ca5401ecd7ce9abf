pub mod relay_handler;
