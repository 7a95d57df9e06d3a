//! `design-os` command-line entry point

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use design_os_cli::{check, inspect, load_config, open_project, Artifact};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn cli() -> Command {
    Command::new("design-os")
        .version(design_os_loader::VERSION)
        .about("Inspect and validate Design OS product artifacts")
        .arg_required_else_help(true)
        .arg(
            Arg::new("root")
                .long("root")
                .global(true)
                .default_value(".")
                .value_parser(value_parser!(PathBuf))
                .help("Project root containing product/ and src/"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Loader config (defaults to design-os.toml in the root, if present)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log loader diagnostics"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("check")
                .about("Check export readiness")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print one parsed artifact with its issues as JSON")
                .arg(
                    Arg::new("artifact")
                        .required(true)
                        .value_parser(Artifact::NAMES)
                        .help("Artifact to load"),
                )
                .arg(
                    Arg::new("section")
                        .long("section")
                        .help("Section id (required for `section`)"),
                ),
        )
        .subcommand(
            Command::new("shell-props")
                .about("Print the shell props a screen design would receive")
                .arg(Arg::new("section").long("section").help("Current section id"))
                .arg(Arg::new("view").long("view").help("Current view name")),
        )
}

fn init_logging(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<ExitCode> {
    let root = matches
        .get_one::<PathBuf>("root")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let explicit = matches.get_one::<PathBuf>("config");
    let mut config = load_config(&root, explicit.map(PathBuf::as_path))?;
    if matches.get_flag("verbose") {
        config = config.with_diagnostics(true);
    }
    let loader = open_project(&root, config)?;

    match matches.subcommand() {
        Some(("check", args)) => {
            let report = check(&loader);
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.render_text());
            }
            Ok(if report.passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Some(("inspect", args)) => {
            let name = args
                .get_one::<String>("artifact")
                .map_or("", String::as_str);
            let Some(artifact) = Artifact::from_name(name) else {
                anyhow::bail!("unknown artifact {name}");
            };
            let section = args.get_one::<String>("section").map(String::as_str);
            let value = inspect(&loader, artifact, section)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Some(("shell-props", args)) => {
            let section = args.get_one::<String>("section").map(String::as_str);
            let view = args.get_one::<String>("view").map(String::as_str);
            let props = loader.shell_props(section, view);
            println!("{}", serde_json::to_string_pretty(&props)?);
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::SUCCESS),
    }
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("verbose"), matches.get_flag("log-json"));

    match run(&matches) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
