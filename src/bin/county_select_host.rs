use anyhow::{Context, Result};
use county_select::host::{dispatch, error_codes, HostState, Request, Response};
use county_select::host::util::init_logging;
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info, warn};

fn write_response(stdout: &mut impl Write, response: &Response) -> Result<()> {
    let json = serde_json::to_string(response).context("Failed to serialize response")?;
    writeln!(stdout, "{}", json).context("Failed to write response")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn main() -> Result<()> {
    init_logging().context("Failed to initialize logging")?;
    info!("Starting county selection host...");

    let mut state = HostState::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!(error = %e, "Error reading stdin");
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let request: Request = match serde_json::from_str(&line) {
            Ok(req) => req,
            Err(e) => {
                warn!(error = %e, "Failed to parse request");
                let response = Response::error(
                    None,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {}", e),
                );
                write_response(&mut stdout, &response)?;
                continue;
            }
        };

        debug!(method = %request.method, "Request");
        let response = dispatch(&mut state, request);
        write_response(&mut stdout, &response)?;
    }

    info!("Shutting down...");
    Ok(())
}
