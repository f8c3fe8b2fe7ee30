use std::fs;
use std::time::Duration;

use clap::{App, Arg};
use log::{info, LevelFilter};

use crossword_csp::{build, parse_structure, parse_words, SearchBudget, Solution, Solver, SolverFailure};

fn setup_logger(verbosity: u64) -> Result<(), fern::InitError> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}][{}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}

fn read(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))
}

fn main() -> Result<(), String> {
    let matches = App::new("crossword")
        .about("Fill a crossword structure from a word list")
        .arg(
            Arg::with_name("structure")
                .value_name("STRUCTURE")
                .help("Structure file, one line per row, '_' for each cell a letter goes in")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("words")
                .value_name("WORDS")
                .help("Word list, one word per line")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("output")
                .value_name("OUTPUT")
                .help("Also write the filled grid here")
                .index(3),
        )
        .arg(
            Arg::with_name("max-nodes")
                .long("max-nodes")
                .value_name("N")
                .help("Give up after visiting this many search nodes")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("timeout-ms")
                .long("timeout-ms")
                .value_name("MILLISECONDS")
                .help("Give up after this long")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log more; repeat for more detail"),
        )
        .arg(
            Arg::with_name("stats")
                .long("stats")
                .help("Print search statistics")
                .takes_value(false),
        )
        .get_matches();

    setup_logger(matches.occurrences_of("verbose"))
        .map_err(|e| format!("Failed to set up logging: {}", e))?;

    // both are required, so clap has already rejected their absence
    let structure = read(matches.value_of("structure").unwrap_or_default())?;
    let words = read(matches.value_of("words").unwrap_or_default())?;

    let structure = parse_structure(&structure).map_err(|e| format!("Failed to parse structure: {:?}", e))?;
    let words = parse_words(&words).map_err(|e| format!("Failed to parse words: {:?}", e))?;
    let model = build(structure, words).map_err(|e| format!("Failed to build model: {:?}", e))?;

    let mut budget = SearchBudget::unlimited();
    if let Some(max_nodes) = matches.value_of("max-nodes") {
        budget = budget.with_max_nodes(max_nodes.parse().map_err(|_| String::from("Failed to parse max-nodes"))?);
    }
    if let Some(timeout) = matches.value_of("timeout-ms") {
        let millis = timeout.parse().map_err(|_| String::from("Failed to parse timeout-ms"))?;
        budget = budget.with_timeout(Duration::from_millis(millis));
    }

    let mut solver = Solver::from(&model).with_budget(budget);
    let result = solver.run();

    if matches.is_present("stats") {
        eprintln!("{:?}", solver.statistics());
    }

    match result {
        Ok(assignment) => {
            let rendered = Solution::new(model.structure(), &assignment).to_string();
            print!("{}", rendered);

            if let Some(output) = matches.value_of("output") {
                fs::write(output, &rendered).map_err(|e| format!("Failed to write {}: {}", output, e))?;
                info!("wrote {}", output);
            }
        }
        Err(SolverFailure::BudgetExceeded) => {
            info!("search budget exhausted");
            println!("No solution found within the search budget.");
        }
        Err(failure) => {
            info!("no fill: {:?}", failure);
            println!("No solution.");
        }
    }

    Ok(())
}
