pub mod job;
mod macros;
