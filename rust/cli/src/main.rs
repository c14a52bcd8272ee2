use std::io;

fn main() {
    roguepoker_cli::logging::init_logging();
    let code = roguepoker_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
