
mod epoch_tests;
mod session_lifecycle_tests;
mod smoke;
mod timeout_tests;
