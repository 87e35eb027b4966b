use crewgen::scaffold_crewai::crew::CrewAi;
use crewgen::{generate, Config, Result};
use std::path::PathBuf;
use std::process;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "crewgen", about = "Generates a new CrewAI project skeleton")]
struct Opt {
	/// Increase output logging verbosity.
	#[structopt(short, long)]
	verbose: bool,

	/// Directory to create the project in.
	#[structopt(short = "C", long, default_value = ".", parse(from_os_str))]
	directory: PathBuf,

	/// Print the files that would be created without writing anything.
	#[structopt(long)]
	dry_run: bool,

	/// Name of the project directory to create.
	project_name: String,
}

fn run(opt: Opt) -> Result<()> {
	let config = Config {
		project_name: opt.project_name,
		directory: opt.directory,
		dry_run: opt.dry_run,
	};

	let (project, plan) = generate(&config, &CrewAi)?;

	if config.dry_run {
		for path in plan.files.keys() {
			println!("{}", project.root().join(path).display());
		}
	} else {
		println!("Created CrewAI project '{}'.", project.name());
	}

	Ok(())
}

fn main() {
	let opt = Opt::from_args();
	if let Err(err) = simple_logger::init_with_level(if opt.verbose {
		log::Level::Debug
	} else {
		log::Level::Info
	}) {
		eprintln!("warning: logging unavailable: {}", err);
	}

	if let Err(err) = run(opt) {
		eprintln!("Error: {}", err);
		process::exit(1);
	}
}
