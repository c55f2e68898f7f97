//! CLI: module manifests → (schema | list)
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use decl_schema::{Diagnostic, Module, Options, RequiredPolicy, SourceModel, Synthesis};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// synthesize JSON Schema (draft-04) documents from resolved struct declarations
#[derive(Parser, Debug)]
#[command(name = "decl-schema", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// synthesize schemas for one or more struct types
    Schema(SchemaOut),
    /// list the declarations found in the inputs
    List(ListOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more module manifests. May be literal paths or quoted glob patterns.
    /// All inputs are merged into a single module.
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// struct type(s) to synthesize
    #[arg(long = "type", short = 't', num_args = 1.., required_unless_present = "all")]
    types: Vec<String>,

    /// synthesize every struct in the module
    #[arg(long, conflicts_with = "types")]
    all: bool,

    /// output .json file (single type) or directory (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// which fields are listed under `required`
    #[arg(long, value_enum, default_value_t = PolicyArg::IndirectOnly)]
    required_policy: PolicyArg,

    /// recurse into fields whose type is another struct in the module
    #[arg(long)]
    expand_nested: bool,

    /// drop unexported fields
    #[arg(long)]
    exported_only: bool,

    /// single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct ListOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PolicyArg {
    IndirectOnly,
    AllClassified,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_module(&self) -> Result<Module> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let mut module = Module::default();
        for source_path in source_paths {
            let next = Module::load(&source_path)?;
            module.merge(next)?;
        }
        Ok(module)
    }
}

impl SchemaOut {
    fn options(&self) -> Options {
        Options {
            required_policy: match self.required_policy {
                PolicyArg::IndirectOnly => RequiredPolicy::IndirectOnly,
                PolicyArg::AllClassified => RequiredPolicy::AllClassified,
            },
            expand_nested: self.expand_nested,
            exported_only: self.exported_only,
        }
    }

    fn run(&self) -> Result<ExitCode> {
        Ok(if self.execute()? { ExitCode::SUCCESS } else { ExitCode::FAILURE })
    }

    /// Synthesize and write; `Ok(false)` when any requested type failed.
    fn execute(&self) -> Result<bool> {
        let module = self.input_settings.load_module()?;
        let options = self.options();

        let mut failed = false;
        let syntheses: Vec<Synthesis> = if self.all {
            let (syntheses, skipped) = decl_schema::synthesize_every_struct(&module, &options)?;
            report_diagnostics(&skipped);
            syntheses
        } else {
            let mut out = Vec::new();
            for (name, result) in decl_schema::synthesize_all(&module, &self.types, &options) {
                match result {
                    Ok(synthesis) => out.push(synthesis),
                    Err(error) => {
                        failed = true;
                        eprintln!("{} {name}: {error}", "error:".red().bold());
                    }
                }
            }
            out
        };

        for synthesis in &syntheses {
            report_diagnostics(&synthesis.diagnostics);
        }
        // nothing succeeded: the errors above are the whole story
        if !syntheses.is_empty() {
            self.write(&syntheses)?;
        }

        Ok(!failed)
    }

    fn encode(&self, synthesis: &Synthesis) -> Result<String> {
        let doc = decl_schema::render(&synthesis.schema);
        let text = if self.compact {
            serde_json::to_string(&doc)?
        } else {
            serde_json::to_string_pretty(&doc)?
        };
        Ok(text)
    }

    fn write(&self, syntheses: &[Synthesis]) -> Result<()> {
        let Some(out) = self.out.as_ref() else {
            for synthesis in syntheses {
                println!("{}", self.encode(synthesis)?);
            }
            return Ok(());
        };

        let single_file = out.extension().is_some_and(|ext| ext == "json");
        if single_file {
            let [synthesis] = syntheses else {
                bail!("{} names a single file but {} schemas were produced", out.display(), syntheses.len());
            };
            return write_file(out, &self.encode(synthesis)?);
        }

        for synthesis in syntheses {
            let path = out.join(format!("{}.schema.json", synthesis.schema.title));
            write_file(&path, &self.encode(synthesis)?)?;
        }
        Ok(())
    }
}

impl ListOut {
    fn run(&self) -> Result<ExitCode> {
        let module = self.input_settings.load_module()?;
        for decl in module.declarations() {
            let detail = match decl.fields() {
                Some(fields) => format!("{} fields", fields.len()),
                None => String::new(),
            };
            println!("{:<10} {} {}", decl.kind_name().cyan(), decl.name.bold(), detail.dimmed());
        }
        Ok(ExitCode::SUCCESS)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<ExitCode> {
        match &self.cmd {
            Command::Schema(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(ExitCode::SUCCESS);
                }
                target.run()
            }
            Command::List(target) => target.run(),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{} {diagnostic}", "warning:".yellow().bold());
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
