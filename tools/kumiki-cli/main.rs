use clap::Parser;
use kumiki::prelude::*;
use std::fs;
use std::io::{self, Write};

/// A schema-driven query form builder CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the service schema JSON file
    schema_path: String,

    /// Document path to build the form for
    #[arg(short, long, default_value = "/query")]
    path: String,

    /// Method of the operation (eg. "get" or "post")
    #[arg(short, long, default_value = "get")]
    method: String,

    /// Print the per-parameter usage table before the form
    #[arg(short, long)]
    usage: bool,

    /// Run in interactive mode to edit fields
    #[arg(short = 'i', long)]
    interactive: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let options = FormOptions::new().path(&cli.path).method(&cli.method);
    let schema_path = cli.schema_path.clone();
    let fetch = move || {
        fs::read_to_string(&schema_path)
            .map_err(|e| FetchError(format!("{}: {}", schema_path, e)))
    };

    let mut form = match Form::run(fetch, options) {
        Ok(form) => form,
        Err(error) => {
            eprintln!("{}", Form::error_banner(&error));
            std::process::exit(1);
        }
    };

    if cli.usage {
        println!("{}", form.usage_text());
    }
    print_form(&form);

    if cli.interactive {
        run_interactive(&mut form);
    }
}

fn print_form(form: &Form) {
    let service = form.service();
    if !service.title.is_empty() {
        println!("{}", service.title);
    }
    if !service.summary.is_empty() {
        println!("{}", service.summary);
    }
    println!();
    print!("{}", form.render_text());
    println!();
    println!("URL: {}", form.url());
}

/// A small edit loop: each command is announced to the engine, settled,
/// and the refreshed form and URL are printed back.
fn run_interactive(form: &mut Form) {
    println!("\nCommands: set <id> <value> | check <id> | uncheck <id> | select <group> <label> | show | quit");
    loop {
        let line = prompt("kumiki");
        let mut words = line.splitn(3, ' ');
        let command = words.next().unwrap_or("");
        let first = words.next().unwrap_or("");
        let rest = words.next().unwrap_or("");

        let outcome = match command {
            "" => continue,
            "quit" | "q" => break,
            "show" => Ok(()),
            "set" => form.set_value(first, rest),
            "check" => form.set_checked(first, true),
            "uncheck" => form.set_checked(first, false),
            "select" => {
                if form.select_option(first, rest) {
                    Ok(())
                } else {
                    println!("No option '{}' in group '{}'", rest, first);
                    continue;
                }
            }
            other => {
                println!("Unknown command '{}'", other);
                continue;
            }
        };

        if let Err(error) = outcome {
            println!("Error: {}", error);
            continue;
        }

        let settlement = form.settle();
        if settlement.processed > 0 {
            println!(
                "(cycle #{}: {} elements, {} changed)",
                settlement.generation,
                settlement.processed,
                settlement.changed.len()
            );
        }
        print_form(form);
    }
}

/// Prompts the user and reads one line of input.
fn prompt(name: &str) -> String {
    print!("{}> ", name);
    io::stdout().flush().unwrap();

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .expect("Failed to read line");
    line.trim().to_string()
}
