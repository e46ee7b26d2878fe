use std::{
    cell::RefCell,
    fs,
    io::{self, BufRead, Write},
    process::ExitCode,
    rc::Rc,
};

use clap::Parser;
use quill::{
    global_environment,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, DEFAULT_MAX_CALL_DEPTH, EvalConfig},
        lexer::lexerize,
        parser::parse,
    },
    run_in,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Name errors from the REPL are reported under.
const REPL_FILENAME: &str = "<repl>";

/// quill is a small, expression-oriented scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells quill to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode prints the value of the script's last statement.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Maximum depth of nested function calls.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Print the token list and stop.
    #[arg(long, conflicts_with = "ast")]
    tokens: bool,

    /// Print the syntax tree and stop.
    #[arg(long)]
    ast: bool,

    /// The script, or its path with `--file`. Starts a REPL when omitted.
    contents: Option<String>,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let mut context = Context::new(EvalConfig { max_call_depth: args.max_call_depth });
    let env = global_environment(Rc::new(RefCell::new(io::stdout())));

    let Some(contents) = &args.contents else {
        return repl(&mut context, &env);
    };

    let (filename, script) = if args.file {
        match fs::read_to_string(contents) {
            Ok(script) => (contents.as_str(), script),
            Err(e) => {
                eprintln!("Failed to read the input file '{contents}': {e}");
                return ExitCode::FAILURE;
            },
        }
    } else {
        ("<inline>", contents.clone())
    };

    let outcome = if args.tokens || args.ast {
        dump(filename, &script, args.ast)
    } else {
        run_in(filename, &script, &mut context, &env).map(|value| {
                                                          if args.pipe_mode {
                                                              println!("{value}");
                                                          }
                                                      })
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

/// Installs a stderr subscriber filtered by `RUST_LOG`.
fn init_tracing() {
    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)
                                                    .with_target(true)
                                                    .with_level(true))
                                  .with(EnvFilter::from_default_env())
                                  .init();
}

/// Prints the token list, or the syntax tree when `ast` is set.
fn dump(filename: &str, script: &str, ast: bool) -> Result<(), quill::error::Error> {
    let lexemes = lexerize(filename, script)?;
    if ast {
        println!("{:#?}", parse(filename, &lexemes)?);
    } else {
        println!("{lexemes:#?}");
    }
    Ok(())
}

/// Reads and runs one line at a time against a persistent scope.
///
/// Each line's value or error is printed and the session continues.
fn repl(context: &mut Context, env: &Rc<Environment>) -> ExitCode {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let Some(line) = lines.next() else {
            println!();
            return ExitCode::SUCCESS;
        };
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Failed to read input: {e}");
                return ExitCode::FAILURE;
            },
        };

        if line.trim().is_empty() {
            continue;
        }

        match run_in(REPL_FILENAME, &line, context, env) {
            Ok(value) => println!("{value}"),
            Err(e) => eprintln!("{e}"),
        }
    }
}
