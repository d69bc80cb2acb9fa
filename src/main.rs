use std::process::ExitCode;

fn main() -> ExitCode {
    match earnings_guard::app::run() {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            println!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
