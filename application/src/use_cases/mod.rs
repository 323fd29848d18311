//! Use cases (application services)

pub mod ask_ai;
pub mod get_transcript;
pub mod process_command;
pub mod session_lifecycle;

#[cfg(test)]
pub(crate) mod test_support;
