use std::process::ExitCode;

fn main() -> ExitCode {
    match clientes_cli::run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}
