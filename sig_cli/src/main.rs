use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let code = sig_cli::run()?;
    Ok(ExitCode::from(code as u8))
}
