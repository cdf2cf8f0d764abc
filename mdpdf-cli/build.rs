use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the built-in style names from mdpdf-core's registry.
// We need to duplicate this here since build scripts can't access the library.
const BUILTIN_STYLES: &[&str] = &[
    "academic",
    "book",
    "dark",
    "default",
    "github",
    "minimal",
    "modern",
    "presentation",
    "technical",
];

const PAGE_SIZES: &[&str] = &[
    "A0", "A1", "A2", "A3", "A4", "A5", "A6", "A7", "A8", "A9", "A10", "B0", "B1", "B2", "B3",
    "B4", "B5", "B6", "B7", "B8", "B9", "B10", "Letter", "Legal", "Ledger", "Tabloid",
    "Executive",
];

fn flag(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .action(ArgAction::SetTrue)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("mdpdf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown documents to styled PDF")
        .arg_required_else_help(true)
        .arg(
            Arg::new("inputs")
                .help("Markdown files to convert, in order")
                .required_unless_present("list-styles")
                .num_args(1..)
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output PDF path")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("style")
                .long("style")
                .short('s')
                .help("Style name or path to a .css file")
                .value_parser(clap::builder::PossibleValuesParser::new(BUILTIN_STYLES))
                .hide_possible_values(true)
                .value_hint(ValueHint::Other),
        )
        .arg(Arg::new("title").long("title").help("Document title"))
        .arg(Arg::new("margin").long("margin").help("Page margin, e.g. 20mm"))
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .help("Page size")
                .value_parser(clap::builder::PossibleValuesParser::new(PAGE_SIZES)),
        )
        .arg(flag("toc", "Generate a table of contents"))
        .arg(flag("no-toc", "Do not generate a table of contents"))
        .arg(flag("merge", "Join files into one continuous flow"))
        .arg(flag("no-merge", "Start every file on a new page"))
        .arg(
            Arg::new("styles-dir")
                .long("styles-dir")
                .help("Directory containing templated style definitions")
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to an mdpdf.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(flag("html", "Write the composed HTML instead of rendering a PDF"))
        .arg(flag("verbose", "Enable debug logging").short('v'))
        .arg(flag("list-styles", "List available styles"));

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "mdpdf", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "mdpdf", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "mdpdf", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
