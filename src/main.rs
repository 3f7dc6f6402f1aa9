use clap::Parser;
use clap::error::ErrorKind;
use log::{LevelFilter, info};

use boxprobe::cli::commands::{
    cmd_analyze, cmd_boxes, cmd_compare, cmd_rects, cmd_styles, requested_command, usage,
};
use boxprobe::cli::config::{AppConfig, Cli, Commands, load_config};
use boxprobe::error::Result;
use boxprobe::record::matcher::ElementFilter;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            print!("{}", usage(requested_command(&args)));
            if !matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                eprintln!("{}", e.render());
            }
            std::process::exit(1);
        }
    };

    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref());

    if let Err(e) = run(cli.command, &config) {
        println!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Rects {
            json,
            tag,
            class,
            text,
        } => {
            let filter = ElementFilter::from_parts(tag.as_deref(), class.as_deref(), text.as_deref());
            cmd_rects(&json, &filter, config)?;
        }
        Commands::Analyze { json } => {
            cmd_analyze(&json, config)?;
        }
        Commands::Compare { json, debug_output } => {
            cmd_compare(&json, debug_output.as_deref(), config)?;
        }
        Commands::Styles {
            json,
            tag,
            class,
            parent_class,
        } => {
            let mut filter = ElementFilter::from_parts(tag.as_deref(), class.as_deref(), None);
            if let Some(parent_class) = parent_class {
                filter = filter.parent_class(parent_class);
            }
            cmd_styles(&json, &filter)?;
        }
        Commands::Boxes {
            engine,
            chrome,
            output,
        } => {
            let matched = cmd_boxes(&engine, &chrome, &output, config)?;
            if !matched {
                info!("boxes differ by more than {}px", config.compare.tolerance);
            }
        }
    }

    Ok(())
}

/// Map `-v` count to a level; `RUST_LOG` still takes precedence.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
