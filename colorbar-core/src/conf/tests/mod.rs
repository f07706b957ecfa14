mod env_tests;
mod loader_tests;
mod validation_tests;
