pub mod escape;
pub mod tape_dumper;
