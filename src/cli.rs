//! Command-line surface. Kept separate from `main.rs` so the argument
//! parsing itself can be unit tested without touching a terminal.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "lc3", about = "An LC-3 virtual machine")]
pub struct Cli {
    /// Object images to load, in order. Later images win on overlap.
    #[arg(required = true)]
    pub images: Vec<PathBuf>,

    /// Enables verbose (debug-level) logging.
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_single_image() {
        let cli = Cli::parse_from(["lc3", "program.obj"]);
        assert_eq!(cli.images, vec![PathBuf::from("program.obj")]);
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_multiple_images_and_verbose_flag() {
        let cli = Cli::parse_from(["lc3", "--verbose", "a.obj", "b.obj"]);
        assert_eq!(
            cli.images,
            vec![PathBuf::from("a.obj"), PathBuf::from("b.obj")]
        );
        assert!(cli.verbose);
    }

    #[test]
    fn rejects_no_images() {
        let result = Cli::try_parse_from(["lc3"]);
        assert!(result.is_err());
    }
}
