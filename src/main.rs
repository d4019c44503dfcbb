use std::{fs, process};

use clap::Parser;
use log::{debug, info};
use yardcalc::{
    compile, evaluate,
    interpreter::{
        converter::program::Program, environment::Environment, lexer::parse_number,
    },
};

/// yardcalc compiles infix formulas to postfix programs and evaluates them.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells yardcalc to read the formula from a file.
    #[arg(short, long)]
    file: bool,

    /// Prints the compiled postfix program before evaluating it.
    #[arg(short, long)]
    postfix: bool,

    /// Reads the input as a postfix program instead of an infix formula.
    #[arg(short, long)]
    read_postfix: bool,

    /// Prints the execution order of the compiled program before evaluating
    /// it.
    #[arg(short, long)]
    order: bool,

    /// Binds a variable before evaluation, e.g. `--var target_value=20`.
    #[arg(short, long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    vars: Vec<(String, f64)>,

    contents: String,
}

fn parse_binding(text: &str) -> Result<(String, f64), String> {
    let (name, value) = text.split_once('=')
                            .ok_or_else(|| format!("expected NAME=VALUE, found '{text}'"))?;
    let value = parse_number(value.trim()).ok_or_else(|| format!("'{value}' is not a number"))?;
    Ok((name.trim().to_string(), value))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let source = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            process::exit(1);
        })
    } else {
        args.contents
    };

    let program = if args.read_postfix {
        source.parse::<Program>().map_err(|e| e.to_string())
    } else {
        compile(source.trim()).map_err(|e| e.to_string())
    };
    let program = program.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });
    info!("program: {program}");

    if args.postfix {
        println!("{program}");
    }

    if args.order {
        match program.execution_order() {
            Ok(order) => println!("{order}"),
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            },
        }
    }

    let mut env = Environment::with_defaults();
    for (name, value) in args.vars {
        debug!("--var {name} = {value}");
        env.set(name, value);
    }

    match evaluate(&program, &env) {
        Ok(evaluation) => {
            debug!("{} binding(s) made", evaluation.delta.len());
            for (name, value) in evaluation.delta.iter() {
                println!("{name} = {value}");
            }
            if let Some(value) = evaluation.value {
                println!("{value}");
            }
        },
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        },
    }
}
