use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use diagnostics::files::SimpleFiles;
use diagnostics::render::render_diagnostic;
use diagnostics::Diagnostic;
use diagnostics::FileId;
use minify_lite::format;
use minify_lite::minify_source;
use minify_lite::Config;
use minify_lite::MinifyError;
use minify_lite::MinifyOptions;
use parse_lite::parse_source;
use parse_lite::to_json;
use parse_lite::token::TT;
use parse_lite::tokenize;
use rayon::prelude::*;
use std::fmt::Write as _;
use std::fs;
use std::io::stdin;
use std::io::stdout;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use symbol_lite::resolve;
use symbol_lite::BindingKind;
use symbol_lite::ScopeId;
use symbol_lite::ScopeTree;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(name = "minify-lite", version, about = "Format and minify scripts")]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Log more to stderr (-v for debug, -vv for trace). Defaults to RUST_LOG or `warn`.
  #[arg(short, long, action = ArgAction::Count, global = true)]
  verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
  /// Print one token per line.
  Tokens(InputArgs),
  /// Print the syntax tree as JSON.
  Ast(InputArgs),
  /// Print every scope with its bindings.
  Scopes(InputArgs),
  /// Pretty print.
  Fmt(PrintArgs),
  /// Rename bindings and print without whitespace.
  Minify(MinifyArgs),
}

#[derive(Args)]
struct InputArgs {
  /// Files to read; omit for stdin.
  files: Vec<PathBuf>,
}

#[derive(Args)]
struct PrintArgs {
  #[command(flatten)]
  input: InputArgs,

  #[command(flatten)]
  settings: ConfigArgs,

  /// Rewrite files in place instead of printing them.
  #[arg(long)]
  write: bool,
}

#[derive(Args)]
struct MinifyArgs {
  #[command(flatten)]
  print: PrintArgs,

  /// Also rename bindings declared at the top level.
  #[arg(long)]
  mangle_toplevel: bool,
}

// WARNING: Keep descriptions in sync with Config.
#[derive(Args)]
struct ConfigArgs {
  /// JSON file with a config object; flags below override it.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Spaces per indentation level.
  #[arg(long)]
  indent_width: Option<usize>,

  /// Preferred maximum line width.
  #[arg(long)]
  print_width: Option<usize>,

  /// Only remove whitespace; keep binding names.
  #[arg(long)]
  no_rename: bool,

  /// Keep `//` comments when pretty printing.
  #[arg(long)]
  keep_comments: bool,
}

impl ConfigArgs {
  fn load(&self) -> Result<Config, String> {
    let mut config = match &self.config {
      Some(path) => {
        let raw = fs::read_to_string(path)
          .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
        serde_json::from_str(&raw)
          .map_err(|err| format!("invalid config {}: {err}", path.display()))?
      }
      None => Config::default(),
    };
    if let Some(indent_width) = self.indent_width {
      config.indent_width = indent_width;
    };
    if let Some(print_width) = self.print_width {
      config.print_width = print_width;
    };
    if self.no_rename {
      config.rename_bindings = false;
    };
    if self.keep_comments {
      config.strip_comments = false;
    };
    Ok(config)
  }
}

/// What to do with each input, with settings already resolved.
enum Job {
  Tokens,
  Ast,
  Scopes,
  Fmt { config: Config, write: bool },
  Minify {
    config: Config,
    options: MinifyOptions,
    write: bool,
  },
}

struct Input {
  name: String,
  path: Option<PathBuf>,
  text: String,
}

enum Failure {
  Diagnostic(Diagnostic),
  Host(String),
}

struct Output {
  /// Text for stdout; empty when the result was written back to the file.
  text: String,
  warnings: Vec<Diagnostic>,
}

fn init_logging(verbose: u8) {
  let filter = match verbose {
    0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    1 => EnvFilter::new("debug"),
    _ => EnvFilter::new("trace"),
  };
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_ansi(false)
    .try_init();
}

fn read_inputs(files: &[PathBuf]) -> Result<Vec<Input>, String> {
  if files.is_empty() {
    let mut text = String::new();
    stdin()
      .read_to_string(&mut text)
      .map_err(|err| format!("failed to read stdin: {err}"))?;
    return Ok(vec![Input {
      name: "<stdin>".to_string(),
      path: None,
      text,
    }]);
  };
  files
    .iter()
    .map(|path| {
      let text = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
      Ok(Input {
        name: path.display().to_string(),
        path: Some(path.clone()),
        text,
      })
    })
    .collect()
}

fn binding_kind(kind: BindingKind) -> &'static str {
  match kind {
    BindingKind::Var => "var",
    BindingKind::Let => "let",
    BindingKind::Const => "const",
    BindingKind::Param => "param",
    BindingKind::Function => "function",
  }
}

fn describe_scope(tree: &ScopeTree, scope: ScopeId, depth: usize, out: &mut String) {
  let data = tree.scope(scope);
  let pad = "  ".repeat(depth);
  let _ = writeln!(out, "{pad}scope {} {:?}", scope.0, data.kind);
  for binding in tree.bindings_in(scope) {
    let _ = writeln!(
      out,
      "{pad}  {} {}: {} references, {} writes",
      binding_kind(binding.kind),
      binding.name,
      binding.references.len(),
      binding.mutation_count,
    );
  }
  for &child in &data.children {
    describe_scope(tree, child, depth + 1, out);
  }
}

fn write_back(input: &Input, text: String, write: bool) -> Result<Output, Failure> {
  match (&input.path, write) {
    (Some(path), true) => {
      fs::write(path, text)
        .map_err(|err| Failure::Host(format!("failed to write {}: {err}", path.display())))?;
      Ok(Output {
        text: String::new(),
        warnings: Vec::new(),
      })
    }
    _ => Ok(Output {
      text,
      warnings: Vec::new(),
    }),
  }
}

fn run(job: &Job, input: &Input, file: FileId) -> Result<Output, Failure> {
  let _span = tracing::info_span!("file", name = %input.name).entered();
  let report = |err: MinifyError| Failure::Diagnostic(err.to_diagnostic(file));
  match job {
    Job::Tokens => {
      let tokens = tokenize(&input.text).map_err(|err| report(err.into()))?;
      let mut text = String::new();
      for token in tokens.iter().filter(|t| t.typ != TT::EOF) {
        let _ = writeln!(
          text,
          "{}:{} {:?} {:?}",
          token.pos.line, token.pos.column, token.typ, token.text
        );
      }
      Ok(Output {
        text,
        warnings: Vec::new(),
      })
    }
    Job::Ast => {
      let top = parse_source(&input.text).map_err(|err| report(err.into()))?;
      let mut text = to_json(&top).map_err(|err| Failure::Host(err.to_string()))?;
      text.push('\n');
      Ok(Output {
        text,
        warnings: Vec::new(),
      })
    }
    Job::Scopes => {
      let mut top = parse_source(&input.text).map_err(|err| report(err.into()))?;
      let tree = resolve(&mut top).map_err(|err| report(err.into()))?;
      let mut text = String::new();
      describe_scope(&tree, tree.root(), 0, &mut text);
      Ok(Output {
        text,
        warnings: tree.diagnostics(file),
      })
    }
    Job::Fmt { config, write } => {
      let text = format(&input.text, config).map_err(report)?;
      write_back(input, text, *write)
    }
    Job::Minify {
      config,
      options,
      write,
    } => {
      let text = minify_source(&input.text, config, options).map_err(report)?;
      write_back(input, text, *write)
    }
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let (files, job) = match &cli.command {
    Commands::Tokens(args) => (&args.files, Ok(Job::Tokens)),
    Commands::Ast(args) => (&args.files, Ok(Job::Ast)),
    Commands::Scopes(args) => (&args.files, Ok(Job::Scopes)),
    Commands::Fmt(args) => (
      &args.input.files,
      args.settings.load().map(|config| Job::Fmt {
        config,
        write: args.write,
      }),
    ),
    Commands::Minify(args) => (
      &args.print.input.files,
      args.print.settings.load().map(|config| Job::Minify {
        config,
        options: MinifyOptions {
          mangle_toplevel: args.mangle_toplevel,
        },
        write: args.print.write,
      }),
    ),
  };
  let job = match job {
    Ok(job) => job,
    Err(message) => {
      eprintln!("error: {message}");
      return ExitCode::FAILURE;
    }
  };
  let inputs = match read_inputs(files) {
    Ok(inputs) => inputs,
    Err(message) => {
      eprintln!("error: {message}");
      return ExitCode::FAILURE;
    }
  };

  let mut sources = SimpleFiles::new();
  let ids: Vec<FileId> = inputs
    .iter()
    .map(|input| sources.add(input.name.as_str(), input.text.as_str()))
    .collect();
  let results: Vec<_> = inputs
    .par_iter()
    .zip(ids.par_iter())
    .map(|(input, &file)| run(&job, input, file))
    .collect();

  let mut failed = false;
  let mut out = stdout().lock();
  for result in results {
    match result {
      Ok(output) => {
        for warning in &output.warnings {
          eprint!("{}", render_diagnostic(&sources, warning));
        }
        let mut text = output.text;
        if inputs.len() > 1 && !text.is_empty() && !text.ends_with('\n') {
          text.push('\n');
        };
        if let Err(err) = out.write_all(text.as_bytes()) {
          eprintln!("error: failed to write output: {err}");
          return ExitCode::FAILURE;
        };
      }
      Err(Failure::Diagnostic(diagnostic)) => {
        failed = true;
        eprint!("{}", render_diagnostic(&sources, &diagnostic));
      }
      Err(Failure::Host(message)) => {
        failed = true;
        eprintln!("error: {message}");
      }
    }
  }
  if failed {
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  }
}
