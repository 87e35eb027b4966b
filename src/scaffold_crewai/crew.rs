use crate::scaffold::Scaffold;
use crate::Template;

pub struct CrewAi;

const MARKED_DIRS: &[&str] = &["", "src/{name}", "src/tools", "src/config"];

const TEMPLATES: &[Template] = &[
	Template::new(".gitignore", include_str!("templates/gitignore")),
	Template::new("README.md", include_str!("templates/README.md")),
	Template::new("pyproject.toml", include_str!("templates/pyproject.toml")),
	Template::new(".env", include_str!("templates/env")),
	Template::new("src/__init__.py", ""),
	Template::new("src/crew.py", include_str!("templates/crew.py")),
	Template::new("src/main.py", include_str!("templates/main.py")),
	Template::new("src/tools/__init__.py", ""),
	Template::new("src/tools/custom_tool.py", include_str!("templates/custom_tool.py")),
	Template::new("src/config/agents.yaml", include_str!("templates/agents.yaml")),
	Template::new("src/config/tasks.yaml", include_str!("templates/tasks.yaml")),
];

impl Scaffold for CrewAi {
	fn name(&self) -> &str {
		"crewai"
	}

	fn marked_dirs(&self) -> &[&'static str] {
		MARKED_DIRS
	}

	fn templates(&self) -> &[Template] {
		TEMPLATES
	}
}
