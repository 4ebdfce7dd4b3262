#![forbid(unsafe_code)]

pub mod console;
pub mod vm;

pub use console::ConsolePresenter;
