use crate::{Error, Placeholders, Result, Scaffold};
use indexmap::IndexMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
	pub project_name: String,
	/// Parent directory the project root is resolved against.
	pub directory: PathBuf,
	pub dry_run: bool,
}

impl Config {
	pub fn new(project_name: impl Into<String>) -> Self {
		Config {
			project_name: project_name.into(),
			directory: PathBuf::from("."),
			dry_run: false,
		}
	}
}

/// Rejects names that are empty or would resolve outside their parent directory.
pub fn validate_name(name: &str) -> Result<()> {
	let reason = if name.is_empty() {
		"must not be empty"
	} else if name == "." || name == ".." {
		"must not be `.` or `..`"
	} else if name.contains(&['/', '\\'][..]) {
		"must not contain a path separator"
	} else if name.contains('\0') {
		"must not contain a NUL byte"
	} else {
		return Ok(());
	};

	Err(Error::InvalidName(name.to_string(), reason))
}

const MARKER_FILE: &str = ".gitkeep";

fn relative(path: String) -> Result<PathBuf> {
	let rel = PathBuf::from(&path);
	let mut components = rel.components().peekable();
	let inside = components.peek().is_some()
		&& components.all(|c| matches!(c, Component::Normal(_)));

	if inside {
		Ok(rel)
	} else {
		Err(Error::PathEscape(path))
	}
}

fn at(path: &Path) -> impl FnOnce(io::Error) -> Error {
	let path = path.to_path_buf();
	move |err| Error::Io(path, err)
}

/// Everything a scaffold produces for one project, relative to its root.
/// Marker files come first in `files`, the root's before the rest, followed
/// by the template table in declaration order.
#[derive(Debug, Default)]
pub struct Plan {
	pub dirs: Vec<PathBuf>,
	pub files: IndexMap<PathBuf, String>,
}

impl Plan {
	pub fn build(scaffold: &impl Scaffold, placeholders: &Placeholders) -> Result<Self> {
		let mut plan = Plan::default();

		for dir in scaffold.marked_dirs() {
			let dir = placeholders.render(dir);
			if dir.is_empty() {
				plan.insert(PathBuf::from(MARKER_FILE), String::new())?;
				continue;
			}

			let dir = relative(dir)?;
			plan.insert(dir.join(MARKER_FILE), String::new())?;
			plan.dirs.push(dir);
		}

		for template in scaffold.templates() {
			let (path, contents) = template.render(placeholders);
			plan.insert(relative(path)?, contents)?;
		}

		Ok(plan)
	}

	fn insert(&mut self, path: PathBuf, contents: String) -> Result<()> {
		if self.files.contains_key(&path) {
			return Err(Error::DuplicatePath(path.display().to_string()));
		}
		self.files.insert(path, contents);
		Ok(())
	}
}

#[derive(Debug, Clone)]
pub struct Project {
	root: PathBuf,
	placeholders: Placeholders,
}

impl Project {
	pub fn new(config: &Config) -> Result<Self> {
		validate_name(&config.project_name)?;

		Ok(Project {
			root: config.directory.join(&config.project_name),
			placeholders: Placeholders::new(&config.project_name),
		})
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn name(&self) -> &str {
		&self.placeholders.name
	}

	pub fn class_name(&self) -> &str {
		&self.placeholders.class_name
	}

	/// Fails if anything, including a dangling symlink, occupies the root.
	pub fn check_vacant(&self) -> Result<()> {
		match fs::symlink_metadata(&self.root) {
			Ok(_) => Err(Error::AlreadyExists(self.name().to_string())),
			Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
			Err(err) => Err(Error::Io(self.root.clone(), err)),
		}
	}

	pub fn plan(&self, scaffold: &impl Scaffold) -> Result<Plan> {
		Plan::build(scaffold, &self.placeholders)
	}

	/// Writes `plan` under the root. The root itself must not exist yet and
	/// no file is ever overwritten. A failure part way through leaves the
	/// partial tree in place.
	pub fn write(&self, plan: &Plan) -> Result<()> {
		match fs::create_dir(&self.root) {
			Ok(()) => {}
			Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
				return Err(Error::AlreadyExists(self.name().to_string()))
			}
			Err(err) => return Err(Error::Io(self.root.clone(), err)),
		}
		log::debug!("created {}", self.root.display());

		for dir in &plan.dirs {
			let dir = self.root.join(dir);
			fs::create_dir_all(&dir).map_err(at(&dir))?;
			log::debug!("created {}", dir.display());
		}

		for (rel, contents) in &plan.files {
			let path = self.root.join(rel);
			if let Some(parent) = path.parent() {
				fs::create_dir_all(parent).map_err(at(parent))?;
			}

			let mut file = OpenOptions::new()
				.write(true)
				.create_new(true)
				.open(&path)
				.map_err(at(&path))?;
			file.write_all(contents.as_bytes()).map_err(at(&path))?;
			log::debug!("wrote {} ({} bytes)", path.display(), contents.len());
		}

		Ok(())
	}

	pub fn generate(&self, scaffold: &impl Scaffold) -> Result<Plan> {
		self.check_vacant()?;
		let plan = self.plan(scaffold)?;
		self.write(&plan)?;
		Ok(plan)
	}
}

/// Resolves, checks and, unless `config.dry_run` is set, writes the project.
pub fn generate(config: &Config, scaffold: &impl Scaffold) -> Result<(Project, Plan)> {
	let project = Project::new(config)?;
	log::debug!(
		"generating {} project {:?} (class name {:?}) at {}",
		scaffold.name(),
		project.name(),
		project.class_name(),
		project.root().display()
	);

	let plan = if config.dry_run {
		project.check_vacant()?;
		project.plan(scaffold)?
	} else {
		project.generate(scaffold)?
	};

	Ok((project, plan))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scaffold_crewai::crew::CrewAi;
	use crate::Template;

	struct Fixed(&'static [Template]);

	impl Scaffold for Fixed {
		fn name(&self) -> &str {
			"fixed"
		}

		fn templates(&self) -> &[Template] {
			self.0
		}
	}

	#[test]
	fn names_that_leave_the_parent_are_rejected() {
		for name in ["", ".", "..", "a/b", "../up", "a\\b", "nul\0"] {
			match validate_name(name) {
				Err(Error::InvalidName(n, _)) => assert_eq!(n, name),
				other => panic!("expected InvalidName for {:?}, got {:?}", name, other),
			}
		}
	}

	#[test]
	fn ordinary_names_are_accepted() {
		for name in ["demo", "my_crew", "my-crew", "My Crew", ".hidden", "v1.0"] {
			assert!(validate_name(name).is_ok(), "{:?}", name);
		}
	}

	#[test]
	fn crewai_plan_lists_markers_then_templates() {
		let plan = Plan::build(&CrewAi, &Placeholders::new("demo")).unwrap();

		assert_eq!(
			plan.dirs,
			vec![
				PathBuf::from("src/demo"),
				PathBuf::from("src/tools"),
				PathBuf::from("src/config"),
			]
		);

		let paths: Vec<_> = plan.files.keys().map(|p| p.to_str().unwrap()).collect();
		assert_eq!(
			paths,
			vec![
				".gitkeep",
				"src/demo/.gitkeep",
				"src/tools/.gitkeep",
				"src/config/.gitkeep",
				".gitignore",
				"README.md",
				"pyproject.toml",
				".env",
				"src/__init__.py",
				"src/crew.py",
				"src/main.py",
				"src/tools/__init__.py",
				"src/tools/custom_tool.py",
				"src/config/agents.yaml",
				"src/config/tasks.yaml",
			]
		);
		assert_eq!(plan.files[&PathBuf::from(".gitkeep")], "");
		assert_eq!(plan.files[&PathBuf::from("src/tools/.gitkeep")], "");
	}

	#[test]
	fn every_planned_path_stays_inside_the_root() {
		let plan = Plan::build(&CrewAi, &Placeholders::new("demo")).unwrap();
		for path in plan.files.keys().chain(plan.dirs.iter()) {
			assert!(path.components().all(|c| matches!(c, Component::Normal(_))), "{:?}", path);
		}
	}

	#[test]
	fn escaping_template_paths_are_rejected() {
		const UP: &[Template] = &[Template::new("../outside", "")];
		const ABS: &[Template] = &[Template::new("/etc/{name}", "")];
		const EMPTY: &[Template] = &[Template::new("", "")];

		for table in [UP, ABS, EMPTY] {
			let err = Plan::build(&Fixed(table), &Placeholders::new("demo")).unwrap_err();
			assert!(matches!(err, Error::PathEscape(_)), "{:?}", err);
		}
	}

	#[test]
	fn paths_rendering_to_the_same_file_are_rejected() {
		const DUP: &[Template] = &[
			Template::new("{name}.txt", "a"),
			Template::new("demo.txt", "b"),
		];

		let err = Plan::build(&Fixed(DUP), &Placeholders::new("demo")).unwrap_err();
		assert!(matches!(err, Error::DuplicatePath(p) if p == "demo.txt"));
	}

	#[test]
	fn project_resolves_root_against_directory() {
		let mut config = Config::new("demo");
		config.directory = PathBuf::from("/tmp/parent");
		let project = Project::new(&config).unwrap();

		assert_eq!(project.root(), Path::new("/tmp/parent/demo"));
		assert_eq!(project.name(), "demo");
		assert_eq!(project.class_name(), "Demo");
	}
}
