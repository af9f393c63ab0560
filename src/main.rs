use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use deskcalc::keypad::{normalize_glyph, token_for_key_name};
use deskcalc::screen::{draw_readout, Framebuffer, SCREEN_SIZE};
use deskcalc::{CalculatorEngine, Readout};
use log::info;

/// Terminal front end for the desk calculator.
///
/// Without `--keys`, reads stdin line by line. Each line holds
/// whitespace-separated command tokens (`12`, `+`, `CE`, `±`, ...) or key
/// names (`Return`, `Escape`, ...); the readout is printed after every line.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Press these keys, one per character, then print the readout and exit
    #[arg(long)]
    keys: Option<String>,

    /// Also print the rendered 132x64 panel
    #[arg(long)]
    screen: bool,

    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut engine = CalculatorEngine::new();
    let mut out = io::stdout().lock();

    if let Some(keys) = &cli.keys {
        info!("batch mode, {} keys", keys.chars().count());

        let mut buf = [0u8; 4];
        for key in keys.chars() {
            engine.process(to_token(key.encode_utf8(&mut buf)));
        }
        print_readout(&mut out, &engine.display(), cli.screen)?;

        return Ok(());
    }

    info!("interactive mode, reading commands from stdin");
    print_readout(&mut out, &engine.display(), cli.screen)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let mut readout = engine.display();
        for word in line.split_whitespace() {
            // Multi-digit words like `12` are typed digit by digit
            if word.len() > 1 && word.chars().all(|c| c.is_ascii_digit() || c == '.') {
                for digit in word.split_inclusive(|_: char| true) {
                    readout = engine.process(digit);
                }
            } else {
                readout = engine.process(to_token(word));
            }
        }
        print_readout(&mut out, &readout, cli.screen)?;
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Key names and glyphs become engine tokens; anything else passes through.
fn to_token(word: &str) -> &str {
    match token_for_key_name(word) {
        Some(token) => token,
        None => normalize_glyph(word),
    }
}

fn print_readout(out: &mut impl Write, readout: &Readout, screen: bool) -> io::Result<()> {
    writeln!(out, "{readout}")?;

    if screen {
        let mut panel = Framebuffer::new(SCREEN_SIZE);
        let Ok(()) = draw_readout(&mut panel, readout);
        write!(out, "{}", panel.to_ascii())?;
    }

    out.flush()
}
