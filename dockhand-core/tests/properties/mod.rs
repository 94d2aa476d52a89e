mod command_tests;
mod container_tests;
mod profile_tests;
