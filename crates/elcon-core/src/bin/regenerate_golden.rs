use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use elcon_core::{FrameEncoding, dump_frame, read_frame};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("input.hex");
        if !input.exists() {
            continue;
        }
        let output = path.join("expected_output.txt");
        regenerate_one(&input, &output)?;
    }

    Ok(())
}

fn regenerate_one(input: &Path, output: &Path) -> Result<(), String> {
    let raw = read_frame(input, FrameEncoding::Hex)
        .map_err(|err| format!("failed to read {}: {}", input.display(), err))?;
    let text = match dump_frame(&raw) {
        Ok(text) => text,
        Err(err) => format!("{err}\n"),
    };
    fs::write(output, text)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
