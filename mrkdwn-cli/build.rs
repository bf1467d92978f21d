use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the argument surface in src/main.rs
// Build scripts can't access src/ modules, so the shape is repeated here
fn input_arg(help: &'static str) -> Arg {
    Arg::new("input")
        .help(help)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("mrkdwn")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Slack mrkdwn message markup to Markdown")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-rewriters")
                .long("list-rewriters")
                .help("List the conversion pipeline stages")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a mrkdwn.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log filter used when RUST_LOG is unset")
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert one message body (default command)")
                .arg(input_arg("Input file path, or - for stdin"))
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("export")
                .about("Convert the messages of a Slack export channel day file")
                .arg(input_arg("Channel day file (JSON array of messages)"))
                .arg(
                    Arg::new("users")
                        .long("users")
                        .value_name("PATH")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("channels")
                        .long("channels")
                        .value_name("PATH")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(output_arg()),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "mrkdwn", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "mrkdwn", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "mrkdwn", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
