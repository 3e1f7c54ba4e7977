use std::process::ExitCode;

fn main() -> ExitCode {
    coordi_cli::run()
}
