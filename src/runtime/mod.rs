pub mod machine;
pub mod runtime_error;
pub mod snapshot;
pub mod tape;
