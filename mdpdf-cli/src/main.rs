// Command-line interface for mdpdf
//
// Converts one or more Markdown files into a single styled PDF. The heavy
// lifting lives in mdpdf-core; this binary validates paths, layers the
// configuration and reports errors.
//
// Usage:
//  mdpdf <input>... -o <output> [options]   - Convert Markdown files to PDF
//  mdpdf --list-styles                      - List built-in and templated styles
//
// Configuration:
//
// Defaults come from mdpdf-config, layered with ./mdpdf.toml and --config.
// Command-line flags override configuration values.
//
// Glob patterns are expanded by the shell; every input must name an existing
// Markdown file.

mod inputs;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use mdpdf_config::{Loader, MdpdfConfig, PROJECT_CONFIG_FILE};
use mdpdf_core::{ChromeRenderer, ConvertRequest, Pipeline};
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("mdpdf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown documents to styled PDF")
        .long_about(
            "mdpdf converts one or more Markdown files into a single styled PDF.\n\n\
            Styles:\n  \
            A style is a built-in preset (see --list-styles), the name of a YAML\n  \
            definition in the styles directory, or a path to a .css file.\n\n\
            Examples:\n  \
            mdpdf notes.md -o notes.pdf                     # Default style\n  \
            mdpdf a.md b.md -o book.pdf --toc --no-merge    # One file per page run\n  \
            mdpdf doc.md -o doc.pdf -s github --page-size Letter\n  \
            mdpdf doc.md -o doc.pdf -s ./theme.css --margin 1in\n  \
            mdpdf doc.md -o debug.html --html               # Inspect the composed HTML"
        )
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
                .value_name("PATH")
                .help("Output PDF path (.pdf is enforced)")
                .required_unless_present("list-styles")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("style")
                .long("style")
                .short('s')
                .value_name("STYLE")
                .help("Style name or path to a .css file")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("title")
                .long("title")
                .value_name("TITLE")
                .help("Document title (defaults to the first heading or file name)"),
        )
        .arg(
            Arg::new("margin")
                .long("margin")
                .value_name("MARGIN")
                .help("Page margin, e.g. 20mm, 1in, 12pt"),
        )
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .value_name("SIZE")
                .help("Page size: A0-A10, B0-B10, Letter, Legal, Ledger, Tabloid, Executive"),
        )
        .arg(
            Arg::new("toc")
                .long("toc")
                .help("Generate a table of contents")
                .action(ArgAction::SetTrue)
                .overrides_with("no-toc"),
        )
        .arg(
            Arg::new("no-toc")
                .long("no-toc")
                .help("Do not generate a table of contents")
                .action(ArgAction::SetTrue)
                .overrides_with("toc"),
        )
        .arg(
            Arg::new("merge")
                .long("merge")
                .help("Join files into one continuous flow")
                .action(ArgAction::SetTrue)
                .overrides_with("no-merge"),
        )
        .arg(
            Arg::new("no-merge")
                .long("no-merge")
                .help("Start every file on a new page")
                .action(ArgAction::SetTrue)
                .overrides_with("merge"),
        )
        .arg(
            Arg::new("styles-dir")
                .long("styles-dir")
                .value_name("DIR")
                .help("Directory containing templated style definitions")
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an mdpdf.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("html")
                .long("html")
                .help("Write the composed HTML instead of rendering a PDF")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-styles")
                .long("list-styles")
                .help("List available styles")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    init_logging(matches.get_flag("verbose"));

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_cli_overrides(&mut config, &matches);

    if matches.get_flag("list-styles") {
        handle_list_styles_command(&config);
        return;
    }

    handle_convert_command(&matches, &config);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Handle a conversion run
fn handle_convert_command(matches: &ArgMatches, config: &MdpdfConfig) {
    let raw_inputs: Vec<String> = matches
        .get_many::<String>("inputs")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let inputs = inputs::validate_inputs(&raw_inputs).unwrap_or_else(|e| fail(e));

    let html_only = matches.get_flag("html");
    let Some(raw_output) = matches.get_one::<String>("output") else {
        fail("An output path is required. Use -o <path>.");
    };
    let output = inputs::prepare_output(raw_output, html_only).unwrap_or_else(|e| fail(e));

    let request = ConvertRequest::new(inputs, &output)
        .with_style(config.convert.style.clone())
        .with_title(matches.get_one::<String>("title").cloned())
        .with_margin(config.convert.margin.clone())
        .with_page_size(config.convert.page_size.clone())
        .with_toc(config.convert.toc)
        .with_merge_mode(config.convert.merge_mode());

    let renderer = match config.render.chrome_bin() {
        Some(binary) => ChromeRenderer::with_binary(binary),
        None => ChromeRenderer::new(),
    };
    let pipeline = Pipeline::new(config.style_resolver(), renderer);

    if html_only {
        let html = pipeline.compose_html(&request).unwrap_or_else(|e| fail(e));
        fs::write(&output, html).unwrap_or_else(|e| {
            fail(format!("Error writing file '{}': {e}", output.display()))
        });
        log::info!("HTML written to {}", output.display());
        return;
    }

    let written = pipeline.run(&request).unwrap_or_else(|e| fail(e));
    println!("PDF created: {}", written.display());
}

/// Handle the list-styles command
fn handle_list_styles_command(config: &MdpdfConfig) {
    let resolver = config.style_resolver();
    let styles = resolver.describe_styles();
    let width = styles.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    println!("Available styles:\n");
    for (name, description) in styles {
        println!("  {name:<width$}  {description}");
    }
    println!(
        "\nTemplated styles are read from {}. Any path ending in .css is used as-is.",
        resolver.templated().directory().display()
    );
}

fn load_cli_config(explicit_path: Option<&str>) -> MdpdfConfig {
    let loader = Loader::new().with_optional_file(PROJECT_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader
        .build()
        .unwrap_or_else(|err| fail(format!("Failed to load configuration: {err}")))
}

fn apply_cli_overrides(config: &mut MdpdfConfig, matches: &ArgMatches) {
    if let Some(style) = matches.get_one::<String>("style") {
        config.convert.style = style.clone();
    }
    if let Some(margin) = matches.get_one::<String>("margin") {
        config.convert.margin = margin.clone();
    }
    if let Some(page_size) = matches.get_one::<String>("page-size") {
        config.convert.page_size = page_size.clone();
    }
    if let Some(dir) = matches.get_one::<String>("styles-dir") {
        config.styles.directory = PathBuf::from(dir);
    }

    if matches.get_flag("toc") {
        config.convert.toc = true;
    } else if matches.get_flag("no-toc") {
        config.convert.toc = false;
    }
    if matches.get_flag("merge") {
        config.convert.merge = true;
    } else if matches.get_flag("no-merge") {
        config.convert.merge = false;
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}
