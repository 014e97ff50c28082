//! EOL source implementations

pub mod endoflife;

pub use endoflife::EndOfLifeDateSource;
