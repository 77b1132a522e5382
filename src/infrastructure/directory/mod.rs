//! Directory readers

mod in_memory;
mod local_directory_reader;

pub use in_memory::InMemoryDirectoryReader;
pub use local_directory_reader::LocalDirectoryReader;
