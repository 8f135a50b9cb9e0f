pub mod case_handler;
