pub mod project;
pub mod scaffold;
pub mod template;
pub use project::*;
pub use scaffold::*;
pub use template::*;

pub mod scaffold_crewai;

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("'{0}' already exists.")]
	AlreadyExists(String),
	#[error("invalid project name {0:?}: {1}")]
	InvalidName(String, &'static str),
	#[error("template path {0:?} escapes the project root")]
	PathEscape(String),
	#[error("template path {0:?} is declared more than once")]
	DuplicatePath(String),
	#[error("io error at {}: {}", .0.display(), .1)]
	Io(PathBuf, #[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
