use crate::Template;

pub trait Scaffold {
	fn name(&self) -> &str;

	/// Directories that receive a `.gitkeep` marker. An empty entry is the
	/// project root.
	fn marked_dirs(&self) -> &[&'static str] {
		&[]
	}

	fn templates(&self) -> &[Template];
}
