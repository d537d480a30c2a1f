use seriesview::{
    Error, Outcome,
    error::{CommandError, ParseError},
    interpreter::{
        command::{Argument, Command, parse_command},
        series::{EndIndex, SeriesConfig},
    },
    run_command,
};

fn run(line: &str) -> Result<Outcome, Error> {
    run_command(line, &SeriesConfig::default())
}

fn command_error(line: &str) -> CommandError {
    match parse_command(line) {
        Ok(command) => panic!("'{line}' parsed as {command:?} but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn series_view_arguments() {
    let command = parse_command("seriesview('n', -2, 10, \"n^2\")").unwrap();
    assert_eq!(command,
               Command::SeriesView { iterator:   Argument::Text("n".into()),
                                     start:      Argument::Integer(-2),
                                     end:        Argument::Integer(10),
                                     expression: Argument::Text("n^2".into()), });

    let command = parse_command("  SeriesView ( 'k' , 0 , Infinity , '1/k^2' )  ").unwrap();
    assert!(matches!(command, Command::SeriesView { end: Argument::Infinity, .. }));

    let command = parse_command("seriesview('n', 1.5, 'inf', 'n')").unwrap();
    assert!(matches!(command,
                     Command::SeriesView { start: Argument::Real(_),
                                           end: Argument::Text(_),
                                           .. }));
}

#[test]
fn help_and_exit() {
    assert_eq!(parse_command("help").unwrap(), Command::Help);
    assert_eq!(parse_command("help()").unwrap(), Command::Help);
    assert_eq!(parse_command("exit").unwrap(), Command::Exit);
    assert_eq!(parse_command("QUIT()").unwrap(), Command::Exit);
}

#[test]
fn grammar_errors() {
    assert_eq!(command_error(""), CommandError::UnexpectedEnd { expected: "a command name" });
    assert_eq!(command_error("print('n')"), CommandError::UnknownCommand { name: "print".into() });
    assert_eq!(command_error("seriesview('n', 0, 3)"), CommandError::ArgumentCount { found: 3 });
    assert_eq!(command_error("seriesview()"), CommandError::ArgumentCount { found: 0 });
    assert!(matches!(command_error("seriesview('n', 0, 3, 'n'"), CommandError::UnexpectedEnd { .. }));
    assert!(matches!(command_error("seriesview('n' 0, 3, 'n')"), CommandError::UnexpectedToken { .. }));
    assert!(matches!(command_error("seriesview('n', 0, 3, n)"), CommandError::UnexpectedToken { .. }));
    assert!(matches!(command_error("help extra"), CommandError::UnexpectedToken { .. }));
    assert!(matches!(command_error("seriesview('n', 0, 99999999999999999999, 'n')"),
                     CommandError::LiteralTooLarge { .. }));

    let CommandError::UnexpectedInput { found, column } = command_error("seriesview('n'; 0)") else {
        panic!("expected unexpected input")
    };
    assert_eq!(found, ";");
    assert_eq!(column, 15);
}

#[test]
fn commands_are_never_executed_as_code() {
    assert!(matches!(command_error("__import__('os').system('ls')"), CommandError::UnexpectedInput { .. } | CommandError::UnknownCommand { .. }));
    assert!(run("seriesview('n', 0, 3, 'n'); exit").is_err());
}

#[test]
fn runs_a_finite_series() {
    let Outcome::Report(report) = run("seriesview('n', 0, 3, 'n^2')").unwrap() else {
        panic!("expected a report")
    };
    assert_eq!(report.end, EndIndex::Finite(3));
    assert_eq!(report.series.partial_sums(), &[0.0, 1.0, 5.0, 14.0]);
    assert_eq!(report.title(), "Series Visualization of sum_{n=0}^{3} n^2");

    let text = report.to_string();
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], report.title());
    assert_eq!(lines[1], "n  partial sum");
    assert_eq!(lines[2], "0  0");
    assert_eq!(lines[5], "3  14");
    assert_eq!(lines.len(), 6);
}

#[test]
fn runs_a_convergent_series() {
    let Outcome::Report(report) = run("seriesview('n', 0, inf, '(1/2)^n')").unwrap() else {
        panic!("expected a report")
    };
    assert_eq!(report.end, EndIndex::Converge);
    assert!(report.title().ends_with("^{inf} (1/2)^n"));
    assert!(report.to_string().lines().last().unwrap().starts_with("converged to"));

    let Outcome::Report(report) = run("seriesview('n', 0, 'Infinity', '(1/3)^n')").unwrap() else {
        panic!("expected a report")
    };
    assert_eq!(report.end, EndIndex::Converge);
}

#[test]
fn argument_types_are_checked_in_order() {
    assert!(matches!(run("seriesview(5, 1.5, 'x', 3)"),
                     Err(Error::Parse(ParseError::InvalidIterator { .. }))));
    assert!(matches!(run("seriesview('n', 1.5, 'x', 3)"),
                     Err(Error::Parse(ParseError::InvalidIndex { which: "start", .. }))));
    assert!(matches!(run("seriesview('n', '0', 3, 'n')"),
                     Err(Error::Parse(ParseError::InvalidIndex { which: "start", .. }))));
    assert!(matches!(run("seriesview('n', 0, 2.5, 'n')"),
                     Err(Error::Parse(ParseError::InvalidIndex { which: "end", .. }))));
    assert!(matches!(run("seriesview('n', 0, 'forever', 'n')"),
                     Err(Error::Parse(ParseError::InvalidIndex { which: "end", .. }))));
    assert!(matches!(run("seriesview('n', 0, 3, 3)"),
                     Err(Error::Parse(ParseError::InvalidExpression { .. }))));
    assert!(matches!(run("seriesview('n', 0, 3, 'n&1')"),
                     Err(Error::Parse(ParseError::InvalidExpression { .. }))));
}

#[test]
fn error_messages() {
    let error = run("seriesview('n', 1.5, 3, 'n')").unwrap_err();
    assert_eq!(error.to_string(), "Invalid start index '1.5'. Indices must be integers.");

    let error = run("seriesview('n', 0, 3, '1/n')").unwrap_err();
    assert!(error.to_string().starts_with("Error at index 0: Division by zero"), "{error}");

    let error = run("seriesview('n', 5, 3, 'n')").unwrap_err();
    assert!(error.to_string().starts_with("Invalid range"), "{error}");
}

#[test]
fn outcomes_for_help_and_exit() {
    assert_eq!(run("help").unwrap(), Outcome::Help);
    assert_eq!(run("exit()").unwrap(), Outcome::Exit);
}

#[test]
fn raw_arguments() {
    assert_eq!(Argument::from_raw("-7"), Argument::Integer(-7));
    assert_eq!(Argument::from_raw("Infinity"), Argument::Infinity);
    assert_eq!(Argument::from_raw("2.5"), Argument::Real(2.5));
    assert_eq!(Argument::from_raw("NaN"), Argument::Text("NaN".into()));
    assert_eq!(Argument::from_raw("1/n"), Argument::Text("1/n".into()));
}
