use std::fs;
use std::path::{Path, PathBuf};

use dossier::get_file_info;

fn collect_files_recursive(
    path: &Path,
    files: &mut Vec<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_file() {
            files.push(entry.path());
        } else if file_type.is_dir() {
            collect_files_recursive(&entry.path(), files)?;
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: dossier <path> [path...]");
        eprintln!();
        eprintln!("Prints a JSON descriptor per file:");
        eprintln!("  - format tag (json, xml, html, excel, csv, text, unknown)");
        eprintln!("  - detected encoding for text-based formats");
        eprintln!("  - binary flag");
        eprintln!("  - path metadata (case number, request code, request/answer role)");
        eprintln!();
        eprintln!("A directory argument is scanned recursively, one descriptor per line.");
        std::process::exit(1);
    }

    for arg in &args[1..] {
        let path = Path::new(arg);
        if path.is_dir() {
            let mut files = Vec::new();
            collect_files_recursive(path, &mut files)?;
            files.sort();
            for file in files {
                let info = get_file_info(&file);
                println!("{}", serde_json::to_string(&info)?);
            }
        } else {
            let info = get_file_info(path);
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}
