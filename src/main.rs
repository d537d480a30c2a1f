use std::{
    io::{self, BufRead, Write},
    time::Duration,
};

use clap::{CommandFactory, Parser, error::ErrorKind};
use log::{LevelFilter, Log, Metadata, Record};
use seriesview::{
    Outcome, USAGE,
    interpreter::{
        command::Argument,
        series::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, SeriesConfig},
    },
    run_arguments, run_command,
};

/// seriesview sums a single-iterator arithmetic expression over a range of
/// indices, or until its partial sums converge.
///
/// Without arguments it starts an interactive session that reads commands of
/// the form `seriesview('n', 0, 10, 'n^2')`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, allow_negative_numbers = true)]
struct Args {
    /// The iterator name, e.g. n.
    iterator: Option<String>,

    /// The first index.
    start: Option<String>,

    /// The last index, or inf to sum until convergence.
    end: Option<String>,

    /// The expression to sum, e.g. 1/n^2.
    expression: Option<String>,

    /// Stop once two consecutive partial sums differ by less than this.
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Maximum number of terms evaluated in convergence mode.
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Abort a run after this many milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log more; repeat for debug and trace output.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log nothing.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn config(&self) -> SeriesConfig {
        let config = SeriesConfig::default().with_tolerance(self.tolerance)
                                            .with_max_iterations(self.max_iterations);
        match self.timeout_ms {
            Some(ms) => config.with_timeout(Duration::from_millis(ms)),
            None => config,
        }
    }
}

/// Writes log records to standard error.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() {
    let args = Args::parse();

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(args.level());
    }

    let config = args.config();

    match (&args.iterator, &args.start, &args.end, &args.expression) {
        (None, None, None, None) => repl(&config),
        (Some(iterator), Some(start), Some(end), Some(expression)) => {
            match run_arguments(&Argument::Text(iterator.clone()),
                                &Argument::from_raw(start),
                                &Argument::from_raw(end),
                                &Argument::Text(expression.clone()),
                                &config)
            {
                Ok(report) => print!("{report}"),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                },
            }
        },
        _ => {
            Args::command().error(ErrorKind::MissingRequiredArgument,
                                  "give all four of <ITERATOR> <START> <END> <EXPRESSION>, or none")
                           .exit();
        },
    }
}

/// Reads commands from standard input until `exit` or end of input.
///
/// An empty line repeats the previous command.
fn repl(config: &SeriesConfig) {
    println!("seriesview {}. Type 'help' for usage, 'exit' to quit.",
             env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut previous: Option<String> = None;

    loop {
        print!("SV> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                log::error!("failed to read input: {e}");
                break;
            },
            None => break,
        };

        let line = if line.trim().is_empty() {
            match &previous {
                Some(previous) => previous.clone(),
                None => continue,
            }
        } else {
            line
        };

        log::info!("running '{}'", line.trim());
        match run_command(&line, config) {
            Ok(Outcome::Report(report)) => print!("{report}"),
            Ok(Outcome::Help) => println!("{USAGE}"),
            Ok(Outcome::Exit) => break,
            Err(e) => eprintln!("{e}"),
        }
        previous = Some(line);
    }
}
