//! MRI Binding Generator CLI

mod commands;

use commands::{check_file, dump_file, gen_file};
use mric::{init_tracing, parse_options, CliOptions};

const GEN_USAGE: &str = "Usage: mric gen <descriptors.json> [-o <dir>] [options]";
const CHECK_USAGE: &str = "Usage: mric check <descriptors.json>";
const DUMP_USAGE: &str = "Usage: mric dump <descriptors.json> [options]";

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "gen" => {
            let options = options_or_exit(&args[2..], GEN_USAGE);
            let Some(input) = &options.input else {
                eprintln!("error: missing declaration file");
                eprintln!("{GEN_USAGE}");
                std::process::exit(1);
            };
            gen_file(input, &options.out_dir, &options.config);
        }
        "check" => {
            let options = options_or_exit(&args[2..], CHECK_USAGE);
            let Some(input) = &options.input else {
                eprintln!("{CHECK_USAGE}");
                std::process::exit(1);
            };
            check_file(input);
        }
        "dump" => {
            let options = options_or_exit(&args[2..], DUMP_USAGE);
            let Some(input) = &options.input else {
                eprintln!("{DUMP_USAGE}");
                std::process::exit(1);
            };
            dump_file(input, &options.config);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("mric {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn options_or_exit(args: &[String], usage: &str) -> CliOptions {
    match parse_options(args) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!("{usage}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("MRI binding generator");
    println!();
    println!("Usage: mric <command> [options]");
    println!();
    println!("Commands:");
    println!("  gen <file.json>      Validate declarations and write bindings");
    println!("  check <file.json>    Validate declarations only");
    println!("  dump <file.json>     Print generated header and source per class");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  -o <dir>             Output directory for gen (default: .)");
    println!("  --binding-dir=<dir>  Binding source directory (default: binding/mri)");
    println!("  --engine-dir=<dir>   Engine header directory (default: content/public)");
    println!("  --namespace=<name>   Native class namespace (default: content)");
    println!();
    println!("Set RUST_LOG=debug to trace lowering and emission.");
    println!();
    println!("Examples:");
    println!("  mric check api.json");
    println!("  mric gen api.json -o binding/mri");
    println!("  mric dump api.json --namespace=urge");
}
