use spine::cli;
use spine::ui::output;

fn main() {
    if let Err(e) = cli::run() {
        output::error(e);
        std::process::exit(1);
    }
}
