//! # `f2formula`
//!
//! Writes the F2 formula of a quantified DIMACS CNF file: the formula, a copy
//! over primed dependent variables and a constraint forcing the two copies to
//! disagree, with the projection variables declared as the support.
//!
//! Without `--out-path`, the output is written next to the input as
//! `sample_F2_<input name>.cnf` (`-a`) or `sample_F2_<input name>_gpmc.cnf`
//! (`-x`).
//!
//! Logging is configured through `RUST_LOG` and defaults to `info`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser};
use f2cnf::{
    f2::{F2Formula, Options, OutputMode},
    instances::QuantInstance,
};
use f2cnf_tools::derived_out_path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("output_mode")
        .required(true)
        .args(["ind", "show", "mode"])
))]
struct Args {
    /// The quantified DIMACS CNF input file
    in_path: PathBuf,
    /// Declare the support as `c ind <vars> 0`
    #[arg(short = 'a')]
    ind: bool,
    /// Declare the support as `c p show <vars> 0`, as expected by GPMC
    #[arg(short = 'x')]
    show: bool,
    /// The output mode by name (`a` or `x`)
    #[arg(long, value_name = "MODE")]
    mode: Option<OutputMode>,
    /// The output path. Derived from the input path if not given.
    #[arg(short, long)]
    out_path: Option<PathBuf>,
    /// Only write the derived clauses, without the original clauses
    #[arg(long)]
    derived_only: bool,
}

impl Args {
    fn output_mode(&self) -> OutputMode {
        match (self.mode, self.show) {
            (Some(mode), _) => mode,
            (None, true) => OutputMode::Show,
            (None, false) => OutputMode::Ind,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mode = args.output_mode();

    let inst = QuantInstance::from_dimacs_path(&args.in_path)
        .with_context(|| format!("error parsing {}", args.in_path.display()))?;

    let f2 = F2Formula::create(
        &inst,
        Options {
            include_original: !args.derived_only,
        },
    );

    let out_path = match args.out_path {
        Some(out_path) => out_path,
        None => derived_out_path(&args.in_path, mode).with_context(|| {
            format!(
                "cannot derive an output file name from {}",
                args.in_path.display()
            )
        })?,
    };
    f2.write_dimacs_path(&out_path, mode)
        .with_context(|| format!("error writing {}", out_path.display()))?;
    log::info!("wrote {}", out_path.display());
    Ok(())
}
