mod application;
mod error;
mod presentation;

use std::process::ExitCode;

fn main() -> ExitCode {
    application::run()
}
