use clap::{Arg, ArgAction, Command};
use expr::{dot, logging, runner};
use std::ffi::OsString;
use std::path::Path;
use std::process;

fn main() {
    let matches = Command::new("expr")
        .about("Evaluate an integer arithmetic expression")
        .arg(
            Arg::new("expr")
                .help("The expression to evaluate, e.g. \"1+2*3\"")
                .value_name("EXPR")
                .allow_hyphen_values(true)
                .index(1),
        )
        .arg(
            Arg::new("dot")
                .short('d')
                .long("dot")
                .help("Write the expression tree as a Graphviz dot file")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log each pipeline stage to stderr")
                .action(ArgAction::SetTrue),
        )
        .get_matches_from(std::env::args_os().map(single_dash_long));

    if let Err(e) = logging::init(matches.get_flag("verbose")) {
        eprintln!("Warning: logging unavailable: {}", e);
    }

    let Some(source) = matches.get_one::<String>("expr") else {
        print_usage();
        process::exit(1);
    };

    let Some(evaluation) = runner::run(source, None) else {
        process::exit(1);
    };
    println!("{}", evaluation.value);

    if let Some(dot_path) = matches.get_one::<String>("dot") {
        let path = Path::new(dot_path);
        if let Err(e) = dot::write_file(&evaluation.tree, path) {
            eprintln!("Error writing '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}

/// Accept the single-dash `-dot FILE` and `-dot=FILE` spellings, which clap
/// would otherwise split into `-d ot`.
fn single_dash_long(arg: OsString) -> OsString {
    match arg.to_str() {
        Some(s) if s == "-dot" || s.starts_with("-dot=") => format!("-{}", s).into(),
        _ => arg,
    }
}

fn print_usage() {
    println!("usage: expr [--dot ast.dot] <expr>");
    println!("example: expr \"1+2+3\"");
}
