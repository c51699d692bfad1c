/// Parsed CLI flags, per `SPEC_FULL.md` §6. `tlang` takes no subcommands
/// and no flag has a value, so a hand-rolled scan is simpler than pulling
/// in an argument-parsing crate for three booleans and a default filename.
pub struct Args {
    pub source_file: String,
    pub interp: bool,
    pub debug: bool,
    pub tokens: bool,
}

impl Args {
    pub fn parse(args: impl Iterator<Item = String>) -> Args {
        let mut source_file = None;
        let mut interp = false;
        let mut debug = false;
        let mut tokens = false;

        for arg in args {
            match arg.as_str() {
                "--interp" => interp = true,
                "--debug" => debug = true,
                "--tokens" => tokens = true,
                other => source_file = Some(other.to_string()),
            }
        }

        Args {
            source_file: source_file.unwrap_or_else(|| "input.txt".to_string()),
            interp,
            debug,
            tokens,
        }
    }
}
