use std::process::ExitCode;

use clap::Parser;
use log::error;

use lc3::{load_image, LoggingNotifier, Machine, TtyConsole};

mod cli;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let console = match TtyConsole::new() {
        Ok(console) => console,
        Err(e) => {
            error!("failed to set up terminal: {e}");
            return ExitCode::from(1);
        }
    };

    let mut machine = Machine::new(console);

    for path in &cli.images {
        let file = match std::fs::File::open(path) {
            Ok(file) => std::io::BufReader::new(file),
            Err(e) => {
                error!("failed to open {}: {e}", path.display());
                return ExitCode::from(1);
            }
        };
        if let Err(e) = load_image(file, &mut machine.memory) {
            error!("failed to load {}: {e}", path.display());
            return ExitCode::from(1);
        }
    }

    let halted = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let ctrlc_halted = halted.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        ctrlc_halted.store(true, std::sync::atomic::Ordering::SeqCst);
    }) {
        error!("failed to install signal handler: {e}");
        return ExitCode::from(1);
    }

    let mut notifier = LoggingNotifier;
    while !machine.is_halted() && !halted.load(std::sync::atomic::Ordering::SeqCst) {
        machine.step(&mut notifier);
    }

    if halted.load(std::sync::atomic::Ordering::SeqCst) && !machine.is_halted() {
        // Interrupted before the program halted itself. The TtyConsole's
        // `Drop` impl restores the terminal on the way out.
        return ExitCode::from(130);
    }

    ExitCode::from(0)
}
