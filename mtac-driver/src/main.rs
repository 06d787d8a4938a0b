//! MIPS Three-Address Compiler Driver
//!
//! Command-line entry point: translates a 3AC file into MIPS32 assembly,
//! or lists how each line of a file is classified.

use clap::{Parser, Subcommand};
use log::debug;
use mtac_codegen::{classify_line, TranslateOptions, Translator};
use mtac_common::{Diagnostic, ErrorReporter, Program, ProgramLoader};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "mtac")]
#[command(about = "Three-address code to MIPS32 translator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (RUST_LOG overrides the level)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a 3AC file into MIPS32 assembly
    Translate {
        /// Input 3AC file
        input: PathBuf,

        /// Output assembly file (defaults to the input with an .asm extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Label that `return` jumps to instead of exiting
        #[arg(long)]
        return_label: Option<String>,

        /// Omit `#` marker comments from the output
        #[arg(long)]
        no_comments: bool,

        /// Also write all diagnostics to this file as JSON
        #[arg(long)]
        diagnostics_json: Option<PathBuf>,
    },

    /// Print the classification of every line in a 3AC file
    Classify {
        /// Input 3AC file
        input: PathBuf,
    },
}

/// JSON shape written by `--diagnostics-json`
#[derive(Serialize)]
struct DiagnosticsReport<'a> {
    input: &'a str,
    errors: usize,
    warnings: usize,
    diagnostics: &'a [Diagnostic],
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    }

    match cli.command {
        Commands::Translate { input, output, return_label, no_comments, diagnostics_json } => {
            let options = TranslateOptions {
                emit_comments: !no_comments,
                return_label,
            };
            if let Err(e) = translate_file(&input, output.as_deref(), options, diagnostics_json.as_deref()) {
                eprintln!("Error translating {}: {}", input.display(), e);
                std::process::exit(1);
            }
        }
        Commands::Classify { input } => {
            if let Err(e) = classify_file(&input) {
                eprintln!("Error classifying {}: {}", input.display(), e);
                std::process::exit(1);
            }
        }
    }
}

fn translate_file(
    input_path: &Path,
    output_path: Option<&Path>,
    options: TranslateOptions,
    diagnostics_path: Option<&Path>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let output_path = match output_path {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input_path),
    };
    if is_same_file(input_path, &output_path) {
        return Err(format!("output would overwrite the input file {}", input_path.display()).into());
    }

    let program = ProgramLoader::load(input_path)?;
    debug!("Translating {} with {:?}", program.name(), options);

    let translation = Translator::translate(&program, options)?;
    translation.write_to(&output_path)?;

    let reporter = translation.reporter();
    reporter.print_diagnostics();
    if !reporter.diagnostics().is_empty() {
        eprintln!("{}", reporter.summary());
    }

    if let Some(path) = diagnostics_path {
        write_diagnostics_json(path, &program, reporter)?;
    }

    println!("Assembly written to: {}", output_path.display());
    if reporter.has_errors() {
        return Err(format!("{}, output is incomplete", reporter.summary()).into());
    }
    Ok(output_path)
}

fn default_output_path(input_path: &Path) -> PathBuf {
    input_path.with_extension("asm")
}

/// Whether `output` names the existing file `input`, after resolving `.`,
/// `..` and symlinks. The output need not exist yet, so its directory is
/// resolved instead.
fn is_same_file(input: &Path, output: &Path) -> bool {
    let Ok(input) = input.canonicalize() else {
        return false;
    };

    let resolved = output.canonicalize().ok().or_else(|| {
        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Some(dir.canonicalize().ok()?.join(output.file_name()?))
    });

    resolved.is_some_and(|output| output == input)
}

fn write_diagnostics_json(
    path: &Path,
    program: &Program,
    reporter: &ErrorReporter,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = DiagnosticsReport {
        input: program.name(),
        errors: reporter.error_count(),
        warnings: reporter.warning_count(),
        diagnostics: reporter.diagnostics(),
    };
    fs::write(path, serde_json::to_string_pretty(&report)?)?;
    debug!("Diagnostics written to {}", path.display());
    Ok(())
}

fn classify_file(input_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let program = ProgramLoader::load(input_path)?;
    for line in classification_listing(&program) {
        println!("{}", line);
    }
    Ok(())
}

/// One `line: classification` entry per non-blank, non-comment line
fn classification_listing(program: &Program) -> Vec<String> {
    program
        .lines()
        .filter_map(|(number, raw)| classify_line(raw).map(|line| format!("{:>4}: {:?}", number, line)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_parses_translate() {
        let cli = Cli::try_parse_from([
            "mtac",
            "translate",
            "prog.3ac",
            "-o",
            "out.asm",
            "--return-label",
            "ret_main",
            "--no-comments",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Translate { input, output, return_label, no_comments, diagnostics_json } => {
                assert_eq!(input, PathBuf::from("prog.3ac"));
                assert_eq!(output, Some(PathBuf::from("out.asm")));
                assert_eq!(return_label.as_deref(), Some("ret_main"));
                assert!(no_comments);
                assert_eq!(diagnostics_json, None);
            }
            other => panic!("expected translate, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["mtac", "translate"]).is_err());
        assert!(Cli::try_parse_from(["mtac", "classify"]).is_err());
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(default_output_path(Path::new("dir/prog.3ac")), PathBuf::from("dir/prog.asm"));
        assert_eq!(default_output_path(Path::new("prog")), PathBuf::from("prog.asm"));
    }

    #[test]
    fn test_translate_file_writes_assembly() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("prog.3ac");
        fs::write(&input, "dataInt x\nt0 = 5\nx = t0\nreturn\n").unwrap();

        let written = translate_file(&input, None, TranslateOptions::default(), None).unwrap();

        assert_eq!(written, dir.path().join("prog.asm"));
        let asm = fs::read_to_string(&written).unwrap();
        assert_eq!(
            asm,
            ".text\n.globl main\n.data\nx: .word 0\n#int declaration\nli $t0, 5\nsw $t0, x\n#return\nli $v0, 10\nsyscall\n"
        );
    }

    #[test]
    fn test_translate_file_without_comments() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("prog.3ac");
        let output = dir.path().join("custom.s");
        fs::write(&input, "dataInt x\nreturn\n").unwrap();

        let options = TranslateOptions {
            emit_comments: false,
            return_label: Some("back".to_string()),
        };
        translate_file(&input, Some(&output), options, None).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            ".text\n.globl main\n.data\nx: .word 0\nj back\n"
        );
    }

    #[test]
    fn test_translate_file_refuses_to_overwrite_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("prog.asm");
        fs::write(&input, "return\n").unwrap();

        assert!(translate_file(&input, None, TranslateOptions::default(), None).is_err());
        assert_eq!(fs::read_to_string(&input).unwrap(), "return\n");
    }

    #[test]
    fn test_translate_file_refuses_equivalent_output_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let input = dir.path().join("prog.asm");
        fs::write(&input, "t0 = 5\n").unwrap();

        for output in [dir.path().join(".").join("prog.asm"), dir.path().join("sub").join("..").join("prog.asm")] {
            assert!(translate_file(&input, Some(&output), TranslateOptions::default(), None).is_err());
        }
        assert_eq!(fs::read_to_string(&input).unwrap(), "t0 = 5\n");
    }

    #[test]
    fn test_is_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("prog.3ac");
        fs::write(&input, "return\n").unwrap();

        assert!(is_same_file(&input, &dir.path().join(".").join("prog.3ac")));
        assert!(!is_same_file(&input, &dir.path().join("prog.asm")));
        assert!(!is_same_file(&input, &dir.path().join("missing").join("prog.3ac")));
        assert!(!is_same_file(&dir.path().join("absent.3ac"), &dir.path().join("absent.3ac")));
    }

    #[test]
    fn test_missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.3ac");

        assert!(translate_file(&input, None, TranslateOptions::default(), None).is_err());
        assert!(!dir.path().join("absent.asm").exists());
    }

    #[test]
    fn test_register_exhaustion_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("many.3ac");
        let source: String = (0..11).map(|i| format!("t{} = {}\n", i, i)).collect();
        fs::write(&input, source).unwrap();

        let err = translate_file(&input, None, TranslateOptions::default(), None).unwrap_err();

        assert!(err.to_string().contains("Register exhaustion"));
        assert!(!dir.path().join("many.asm").exists());
    }

    #[test]
    fn test_diagnostics_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("prog.3ac");
        let json_path = dir.path().join("diag.json");
        fs::write(&input, "param y\ncall print, 1\n").unwrap();

        translate_file(&input, None, TranslateOptions::default(), Some(&json_path)).unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(report["errors"], 0);
        assert_eq!(report["warnings"], 1);
        assert_eq!(report["diagnostics"][0]["severity"], "Warning");
        assert_eq!(report["diagnostics"][0]["location"]["line"], 2);
    }

    #[test]
    fn test_dropped_code_fails_after_writing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("prog.3ac");
        let json_path = dir.path().join("diag.json");
        fs::write(&input, "dataFloat f\nf = t0\nreturn\n").unwrap();

        let err = translate_file(&input, None, TranslateOptions::default(), Some(&json_path)).unwrap_err();

        assert_eq!(err.to_string(), "1 error, output is incomplete");
        assert!(dir.path().join("prog.asm").exists());
        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(report["errors"], 1);
        assert_eq!(report["diagnostics"][0]["severity"], "Error");
        assert_eq!(report["diagnostics"][0]["notes"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_classification_listing() {
        let program = Program::from_source("p.3ac", "# header\n\nloop:\nt0 = 1\n");

        assert_eq!(
            classification_listing(&program),
            vec![
                "   3: Label(\"loop:\")".to_string(),
                "   4: SimpleAssign { dest: \"t0\", value: IntOrChar(\"1\") }".to_string(),
            ]
        );
    }
}
