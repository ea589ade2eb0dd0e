use std::process::ExitCode;

fn main() -> ExitCode {
    trendscope_cli::run()
}
