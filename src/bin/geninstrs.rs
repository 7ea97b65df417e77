use std::{
    env,
    fs::File,
    io::{self, BufReader, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use geninstrs::{
    fileman::{self, RealFileSystem},
    generator::Generator,
    table::{self, DEFAULT_TABLE},
};
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the assembly file holding the instruction table
    #[clap(parse(from_os_str), value_name = "FILE")]
    file: PathBuf,

    /// Label of the instruction table
    #[clap(short, long, value_name = "NAME", default_value = DEFAULT_TABLE)]
    table: String,

    /// Path to output file [default: stdout]
    #[clap(parse(from_os_str), short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log each expanded row to stderr
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = <Args as Parser>::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(io::stderr)
        .init();

    let mut output: Box<dyn Write> = if let Some(path) = args.output {
        let result = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.as_path());
        match result {
            Err(e) => {
                eprintln!(
                    "[ERROR]: Cannot open output file \"{}\" for writing: {e}",
                    path.display()
                );
                return ExitCode::FAILURE;
            }
            Ok(file) => Box::new(file),
        }
    } else {
        Box::new(io::stdout().lock())
    };

    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("[ERROR]: Cannot determine working directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (path, reader) = match fileman::open_source(&RealFileSystem::new(), &cwd, &args.file) {
        Ok(tup) => tup,
        Err(e) => {
            eprintln!("[ERROR]: {e}");
            return ExitCode::FAILURE;
        }
    };

    let rows = match table::read_table(BufReader::new(reader), &args.table) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("[ERROR]: \"{}\": {e}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let generator = Generator::new(rows);
    let summary = match generator.write_all(&mut output) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("[ERROR]: \"{}\": {e}", path.display());
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = output.flush() {
        eprintln!("[ERROR]: Failed to write output: {e}");
        return ExitCode::FAILURE;
    }

    tracing::info!(
        file = %path.display(),
        table = %args.table,
        rows = generator.rows().len(),
        lines = summary.lines,
        "Generated test vectors"
    );
    ExitCode::SUCCESS
}
