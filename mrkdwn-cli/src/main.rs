// Command-line interface for mrkdwn
//
// This binary converts Slack message markup ("mrkdwn") into Markdown. The conversion itself lives in
// the mrkdwn-babel crate; this crate reads files, layers configuration and writes results.
//
// Usage:
//  mrkdwn <input> [-o <file>]                    - Convert one message body (default)
//  mrkdwn convert <input|-> [-o <file>]          - Same as above (explicit, `-` reads stdin)
//  mrkdwn export <day.json> [--users <users.json>] [--channels <channels.json>] [-o <file>]
//                                                - Convert every message of a Slack export day file
//  mrkdwn --list-rewriters                       - List the pipeline stages
//
// Extra Parameters:
//
// Conversion knobs can be overridden for one run using --extra-<parameter-name> [value].
// The CLI layer strips the "extra-" prefix and applies the value over the loaded configuration.
// Example:
//  mrkdwn notes.txt --extra-italic-style star --extra-no-links

use clap::{Arg, ArgAction, Command, ValueHint};
use mrkdwn_babel::export::convert_messages;
use mrkdwn_babel::{ConversionOptions, Directory, ItalicStyle, Pipeline};
use mrkdwn_config::{Loader, MrkdwnConfig};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "export", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("mrkdwn")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Slack mrkdwn message markup to Markdown")
        .long_about(
            "mrkdwn rewrites Slack message markup into Markdown.\n\n\
            Commands:\n  \
            - convert: Convert one message body (default command)\n  \
            - export:  Convert every message of a Slack export channel day file\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override conversion settings.\n  \
            Boolean flags can omit the value (defaults to 'true').\n  \
            Known names: italic-style, no-links, no-mentions, no-emphasis, no-code, compact\n\n\
            Examples:\n  \
            mrkdwn message.txt                          # Convert to stdout\n  \
            echo '*hi*' | mrkdwn convert -              # Convert stdin\n  \
            mrkdwn message.txt --extra-italic-style star\n  \
            mrkdwn export general/2024-01-02.json --users users.json"
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
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
                .default_value("warn")
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert one message body (default command)")
                .long_about(
                    "Convert one Slack message body to Markdown.\n\n\
                    The whole input is treated as one message. Output goes to stdout by\n\
                    default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    mrkdwn convert message.txt              # Convert to stdout\n  \
                    mrkdwn convert - < message.txt          # Read stdin\n  \
                    mrkdwn message.txt -o message.md        # 'convert' is optional"
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("export")
                .about("Convert the messages of a Slack export channel day file")
                .long_about(
                    "Convert the `text` of every message in a Slack export day file.\n\n\
                    Each message gains `has_link` and `mentioned_user_ids` fields; all other\n\
                    fields are kept. Pass the export's users.json and channels.json so that\n\
                    mentions are written with names.\n\n\
                    Examples:\n  \
                    mrkdwn export general/2024-01-02.json --users users.json --channels channels.json"
                )
                .arg(
                    Arg::new("input")
                        .help("Channel day file (JSON array of messages)")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("users")
                        .long("users")
                        .value_name("PATH")
                        .help("The export's users.json")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("channels")
                        .long("channels")
                        .value_name("PATH")
                        .help("The export's channels.json")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(output_arg()),
        )
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare input path means "convert"
            if let Some(injected) = inject_default_subcommand(&cleaned_args) {
                match cli.try_get_matches_from(&injected) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let log_level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("warn");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    for key in extra_params.keys() {
        eprintln!("Warning: ignoring unknown parameter --extra-{key}");
    }

    if matches.get_flag("list-rewriters") {
        handle_list_rewriters_command(&config);
        return;
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                eprintln!("Error: an input path is required");
                std::process::exit(1);
            };
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, output, &config);
        }
        Some(("export", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                eprintln!("Error: an input path is required");
                std::process::exit(1);
            };
            let users = sub_matches.get_one::<String>("users").map(|s| s.as_str());
            let channels = sub_matches.get_one::<String>("channels").map(|s| s.as_str());
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_export_command(input, users, channels, output, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Rewrite `mrkdwn <input> ...` into `mrkdwn convert <input> ...`.
fn inject_default_subcommand(args: &[String]) -> Option<Vec<String>> {
    let first = args.get(1)?;
    let looks_like_input = first == "-" || !first.starts_with('-');
    if !looks_like_input || SUBCOMMANDS.contains(&first.as_str()) {
        return None;
    }

    let mut injected = vec![args[0].clone(), "convert".to_string()];
    injected.extend_from_slice(&args[1..]);
    Some(injected)
}

/// Handle the convert command
fn handle_convert_command(input: &str, output: Option<&str>, config: &MrkdwnConfig) {
    let source = read_input(input);
    let pipeline = Pipeline::with_options(&conversion_options(config), Directory::default());

    let conversion = pipeline.run(&source);
    info!(
        input,
        has_link = conversion.has_link,
        mentions = conversion.mentioned_user_ids.len(),
        "converted message"
    );

    write_output(output, &conversion.text);
}

/// Handle the export command
fn handle_export_command(
    input: &str,
    users: Option<&str>,
    channels: Option<&str>,
    output: Option<&str>,
    config: &MrkdwnConfig,
) {
    let day = read_input(input);
    let users = users.map(read_input);
    let channels = channels.map(read_input);

    let directory = Directory::from_export(users.as_deref(), channels.as_deref())
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });
    debug!(
        users = directory.user_count(),
        channels = directory.channel_count(),
        "loaded export directory"
    );

    let pipeline = Pipeline::with_options(&conversion_options(config), directory);
    let messages = convert_messages(&day, &pipeline).unwrap_or_else(|e| {
        eprintln!("Error in '{input}': {e}");
        std::process::exit(1);
    });
    info!(input, messages = messages.len(), "converted export file");

    let rendered = if config.export.pretty {
        serde_json::to_string_pretty(&messages)
    } else {
        serde_json::to_string(&messages)
    };
    let mut rendered = rendered.unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    rendered.push('\n');

    write_output(output, &rendered);
}

/// Handle the list-rewriters command
fn handle_list_rewriters_command(config: &MrkdwnConfig) {
    let pipeline = Pipeline::with_options(&conversion_options(config), Directory::default());

    println!("Pipeline stages (in order):\n");
    for stage in pipeline.stages() {
        println!("  {:<10} {}", stage.name(), stage.description());
    }
}

fn read_input(path: &str) -> String {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .unwrap_or_else(|e| {
                eprintln!("Error reading stdin: {e}");
                std::process::exit(1);
            });
        return source;
    }

    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn write_output(output: Option<&str>, text: &str) {
    match output {
        Some(path) => fs::write(path, text).unwrap_or_else(|e| {
            eprintln!("Error writing file '{path}': {e}");
            std::process::exit(1);
        }),
        None => print!("{text}"),
    }
}

fn conversion_options(config: &MrkdwnConfig) -> ConversionOptions {
    ConversionOptions::from(&config.convert)
}

fn load_cli_config(explicit_path: Option<&str>) -> MrkdwnConfig {
    let loader = Loader::new().with_optional_file("mrkdwn.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut MrkdwnConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["italic-style", "italic"]) {
        config.convert.italic_style = parse_italic_style(&raw);
    }
    if let Some(raw) = extra_params.remove("no-links") {
        config.convert.links = !parse_bool_arg("no-links", &raw);
    }
    if let Some(raw) = extra_params.remove("no-mentions") {
        config.convert.mentions = !parse_bool_arg("no-mentions", &raw);
    }
    if let Some(raw) = extra_params.remove("no-emphasis") {
        config.convert.emphasis = !parse_bool_arg("no-emphasis", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["no-code", "no-protect-code"]) {
        config.convert.protect_code = !parse_bool_arg("no-code", &raw);
    }
    if let Some(raw) = extra_params.remove("compact") {
        config.export.pretty = !parse_bool_arg("compact", &raw);
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_italic_style(raw: &str) -> ItalicStyle {
    match raw.to_lowercase().as_str() {
        "doubled" | "double" | "underscore" => ItalicStyle::Doubled,
        "star" | "asterisk" => ItalicStyle::Star,
        other => {
            eprintln!("Invalid italic style '{other}' for --extra-italic-style (expected doubled or star)");
            std::process::exit(1);
        }
    }
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
