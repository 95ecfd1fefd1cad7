mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscore;
mod logging;
mod ticker;
mod util;
mod warning;
use crate::app::App;
use crate::config::{validate_grid_size, Config};
use crate::game::{GameSession, Grid};
use crate::warning::Warning;
use lexopt::{Arg, Parser, ValueExt};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

static USAGE: &str = "\
Usage: gridsnake [<options>]

Play snake in the terminal

Options:
  -c, --config <file>     Read configuration from the given file
      --grid-size <n>     Play on an n-by-n grid (12 to 20)
  -h, --help              Show this help message and exit
  -V, --version           Show the program version and exit
";

fn main() -> ExitCode {
    match Arguments::from_parser(Parser::from_env()) {
        Ok(Arguments::Run(args)) => anyhow_exit(run(args)),
        Ok(Arguments::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Arguments::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e}");
            eprint!("{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut warnings = Vec::new();
    let config = match args.config {
        Some(ref path) => Config::load(path, false),
        None => Config::default_path().and_then(|p| Config::load(&p, true)),
    };
    let config = config.unwrap_or_else(|e| {
        warnings.push(Warning::from(e));
        Config::default()
    });
    if let Err(e) = logging::init(&config.logging) {
        warnings.push(Warning::from(e));
    }
    let grid = Grid::new(args.grid_size.unwrap_or(config.game.grid_size));
    let session = GameSession::new(grid, config.high_score_store());
    let terminal = ratatui::init();
    let r = App::new(session, warnings).run(terminal);
    ratatui::restore();
    log::info!("Exiting");
    Ok(r?)
}

fn anyhow_exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<io::Error>() {
            Some(ioerr) if ioerr.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
            _ => {
                log::error!("Fatal error: {e:#}");
                eprintln!("gridsnake: {e:#}");
                ExitCode::from(2)
            }
        },
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Arguments {
    Run(RunArgs),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunArgs {
    config: Option<PathBuf>,
    grid_size: Option<u16>,
}

impl Arguments {
    fn from_parser(mut parser: Parser) -> Result<Arguments, lexopt::Error> {
        let mut args = RunArgs::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Arguments::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Arguments::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("grid-size") => {
                    let size = parser.value()?.parse::<u16>()?;
                    let size = validate_grid_size(size).map_err(|e| lexopt::Error::ParsingFailed {
                        value: size.to_string(),
                        error: Box::new(e),
                    })?;
                    args.grid_size = Some(size);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Arguments::Run(args))
    }
}
