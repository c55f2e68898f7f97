//! Golden-file runner.
//!
//! Every directory under `fixtures/` is one case:
//!
//! - `module.json`          module manifest
//! - `case.json` (optional) `{ "options": { ... }, "expect_error": { "<Type>": "<message fragment>" } }`
//! - `<Type>.schema.json`   expected pretty-printed document for `<Type>`
//!
//! A case must check at least one type, through a golden or `expect_error`.
//!
//! Run with `--bless` to rewrite goldens from the current output.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use colored::Colorize;
use decl_schema::{Module, Options};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static GOLDEN_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<ty>[A-Za-z_][A-Za-z0-9_]*)\.schema\.json$").unwrap());

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CaseConfig {
    options: Options,
    /// type name → fragment the synthesis error message must contain
    expect_error: BTreeMap<String, String>,
}

#[derive(Debug)]
enum Outcome {
    Pass,
    Blessed,
    Fail(String),
}

fn main() -> ExitCode {
    let bless = std::env::args().any(|a| a == "--bless");
    let root = std::env::args()
        .skip(1)
        .find(|a| !a.starts_with("--"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../fixtures"));

    let cases = match list_cases(&root) {
        Ok(cases) => cases,
        Err(error) => {
            eprintln!("❌ cannot read {}: {error}", root.display());
            return ExitCode::FAILURE;
        }
    };

    let mut failures = 0usize;
    for case in cases {
        let label = case.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        match run_case(&case, bless) {
            Ok(results) => {
                for (ty, outcome) in results {
                    match outcome {
                        Outcome::Pass => eprintln!("✅ {label}/{ty}"),
                        Outcome::Blessed => eprintln!("{} {label}/{ty}", "blessed".yellow()),
                        Outcome::Fail(why) => {
                            failures += 1;
                            eprintln!("❌ {label}/{ty}: {}", why.red());
                        }
                    }
                }
            }
            Err(error) => {
                failures += 1;
                eprintln!("❌ {label}: {}", error.red());
            }
        }
    }

    if failures == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn list_cases(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut cases: Vec<PathBuf> = std::fs::read_dir(root)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.join("module.json").is_file())
        .collect();
    cases.sort();
    Ok(cases)
}

fn run_case(dir: &Path, bless: bool) -> Result<Vec<(String, Outcome)>, String> {
    let module = Module::load(&dir.join("module.json")).map_err(|e| e.to_string())?;
    let config = load_config(&dir.join("case.json"))?;

    let mut goldens: Vec<(String, PathBuf)> = std::fs::read_dir(dir)
        .map_err(|e| e.to_string())?
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            let ty = GOLDEN_NAME.captures(&name)?.name("ty")?.as_str().to_string();
            Some((ty, e.path()))
        })
        .collect();
    goldens.sort();

    if goldens.is_empty() && config.expect_error.is_empty() {
        return Err("no *.schema.json goldens and no expect_error entries".into());
    }

    let mut out = Vec::new();
    for (ty, fragment) in &config.expect_error {
        let outcome = match decl_schema::synthesize(&module, ty, &config.options) {
            Ok(_) => Outcome::Fail(format!("expected an error containing `{fragment}`, got a schema")),
            Err(error) if error.to_string().contains(fragment.as_str()) => Outcome::Pass,
            Err(error) => Outcome::Fail(format!("expected an error containing `{fragment}`, got `{error}`")),
        };
        out.push((ty.clone(), outcome));
    }
    for (ty, path) in goldens {
        let actual = match decl_schema::synthesize(&module, &ty, &config.options) {
            Ok(s) => decl_schema::render::to_string_pretty(&s.schema).map_err(|e| e.to_string())? + "\n",
            Err(error) => {
                out.push((ty, Outcome::Fail(error.to_string())));
                continue;
            }
        };
        if bless {
            std::fs::write(&path, &actual).map_err(|e| e.to_string())?;
            out.push((ty, Outcome::Blessed));
            continue;
        }
        let expected = std::fs::read_to_string(&path).map_err(|e| e.to_string())?;
        let outcome = if expected == actual {
            Outcome::Pass
        } else {
            Outcome::Fail(first_difference(&expected, &actual))
        };
        out.push((ty, outcome));
    }
    Ok(out)
}

fn load_config(path: &Path) -> Result<CaseConfig, String> {
    if !path.is_file() {
        return Ok(CaseConfig::default());
    }
    let src = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let de = &mut serde_json::Deserializer::from_str(&src);
    serde_path_to_error::deserialize(de).map_err(|err| {
        let at = err.path().to_string();
        format!("{}: at JSON path {at} → {}", path.display(), err.into_inner())
    })
}

fn first_difference(expected: &str, actual: &str) -> String {
    let mut exp = expected.lines();
    let mut act = actual.lines();
    let mut line = 1;
    loop {
        match (exp.next(), act.next()) {
            (Some(e), Some(a)) if e == a => line += 1,
            (None, None) => return "output differs only in trailing whitespace".into(),
            (e, a) => {
                return format!(
                    "line {line}: expected `{}`, got `{}`",
                    e.unwrap_or("<eof>").trim(),
                    a.unwrap_or("<eof>").trim()
                );
            }
        }
    }
}
