// The binary uses the library, not duplicate modules
use std::process::ExitCode;

fn main() -> ExitCode {
    track_crop::run_native()
}
