use anyhow::{format_err, Context};
use clap::{ArgMatches, SubCommand};

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::{tables, FontSet, PreviewLayout, SnippetLayout, Theme};

mod logging;

pub fn run() {
    // Enable colored backtraces
    #[cfg(feature = "better-panic")]
    better_panic::Settings::auto().lineno_suffix(true).install();

    // Initialize logger
    env_logger::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(logging::formatter)
        .init();

    flame!(start "execute_cli");
    let result = std::panic::catch_unwind(execute_cli);
    flame!(end "execute_cli");

    #[cfg(feature = "flamegraph")]
    {
        if let Err(e) = fs::File::create("flamegraph.html").and_then(|mut f| flame::dump_html(&mut f))
        {
            log::warn!("Could not write flamegraph: {}", e);
        }
    }

    match result {
        Ok(Ok(())) => (),
        // Report any errors
        Ok(Err(e)) => {
            log::error!("{:?}", e);
            std::process::exit(1);
        }
        // Catch any panics and print an error message. This will appear after the message given by
        // better backtrace.
        Err(_) => {
            log::error!(concat!(
                "The program has encountered a critical internal error and will now exit. ",
                "This is a bug. Please report it on our issue tracker."
            ));
            std::process::exit(1);
        }
    }
}

fn execute_cli() -> anyhow::Result<()> {
    use clap::{crate_authors, crate_version, App, AppSettings, Arg};

    let theme_arg = Arg::with_name("theme")
        .help("The theme to render: an xrdb file, or an hterm style .json profile")
        .required(true);
    let out_arg = Arg::with_name("out_file")
        .help("The PNG file to render to")
        .required(true);
    let common_args = [
        Arg::with_name("title")
            .long("title")
            .short("T")
            .help("The title drawn at the top of the image")
            .takes_value(true),
        Arg::with_name("font")
            .long("font")
            .help("A monospace TrueType or OpenType font for the text")
            .takes_value(true),
        Arg::with_name("title_font")
            .long("title-font")
            .help("A TrueType or OpenType font for the title")
            .takes_value(true),
        Arg::with_name("force")
            .long("force")
            .short("f")
            .help("Overwrite existing output file"),
    ];

    #[rustfmt::skip]
    let args = App::new("scheme-preview")
        .version(crate_version!())
        .author(crate_authors!())
        .about("Renders terminal color schemes and ANSI colored output as PNG images.")
        .setting(AppSettings::ColoredHelp)
        .setting(AppSettings::ArgRequiredElseHelp)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(SubCommand::with_name("render")
            .about("Renders ANSI colored text with the theme's colors")
            .arg(theme_arg.clone())
            .arg(out_arg.clone())
            .arg(Arg::with_name("input")
                .long("input")
                .short("i")
                .help("The file with ANSI colored text to render. Reads standard input if omitted or `-`")
                .takes_value(true))
            .arg(Arg::with_name("table")
                .long("table")
                .short("t")
                .help("Render a built-in color table instead of an input file")
                .takes_value(true)
                .possible_values(&["16", "256"])
                .conflicts_with("input"))
            .args(&common_args))
        .subcommand(SubCommand::with_name("preview")
            .about("Renders a preview card of the theme's palette")
            .arg(theme_arg)
            .arg(out_arg)
            .args(&common_args))
        .get_matches();

    match args.subcommand() {
        ("render", Some(sub)) => render(sub),
        ("preview", Some(sub)) => preview(sub),
        (other, _) => Err(format_err!("Unknown subcommand: {}", other)),
    }
}

/// Load the theme named on the command line
fn load_theme(args: &ArgMatches) -> anyhow::Result<Theme> {
    let path = args
        .value_of("theme")
        .ok_or_else(|| format_err!("Missing required argument: theme"))?;

    Theme::load(path).context(format!("Could not load theme: {}", path))
}

fn load_fonts(args: &ArgMatches, text_size: f32, title_size: f32) -> FontSet {
    FontSet::load(
        args.value_of("font").map(Path::new),
        args.value_of("title_font").map(Path::new),
        text_size,
        title_size,
    )
}

/// Get the output path, making sure we don't clobber an existing file unless asked to
fn output_path<'a>(args: &'a ArgMatches) -> anyhow::Result<&'a Path> {
    let out_file_path = Path::new(
        args.value_of("out_file")
            .ok_or_else(|| format_err!("Missing required argument: out_file"))?,
    );

    if out_file_path.exists() && !args.is_present("force") {
        return Err(format_err!(
            "Output file already exists: {} (use --force to overwrite)",
            out_file_path.to_string_lossy()
        ));
    }

    let is_png = out_file_path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);
    if !is_png {
        log::warn!(
            "Output file does not have a .png extension, writing PNG data to {} anyway",
            out_file_path.to_string_lossy()
        );
    }

    Ok(out_file_path)
}

/// Write the finished image in one go so a failed run never leaves a partial file behind
fn write_output(path: &Path, png: &[u8]) -> anyhow::Result<()> {
    fs::write(path, png).context(format!(
        "Could not write output file: {}",
        path.to_string_lossy()
    ))?;
    log::info!("Generated {}", path.to_string_lossy());

    Ok(())
}

fn render(args: &ArgMatches) -> anyhow::Result<()> {
    let theme = load_theme(args)?;
    let out_file_path = output_path(args)?;

    let (text, default_title) = match args.value_of("table") {
        Some("16") => (
            tables::color_table_16(),
            format!("16 Color Table ({})", theme.name),
        ),
        Some("256") => (
            tables::color_table_256(&theme.palette),
            format!("256 Color Table ({})", theme.name),
        ),
        Some(other) => return Err(format_err!("Invalid option to --table: {}", other)),
        None => {
            let input = args.value_of("input").unwrap_or("-");
            (read_input(input)?, format!("ANSI Output ({})", theme.name))
        }
    };
    let title = args.value_of("title").map(String::from).unwrap_or(default_title);

    let layout = SnippetLayout::default();
    let fonts = load_fonts(args, layout.text_size, layout.title_size);

    let mut png = Vec::new();
    crate::convert_ansi_to_png(text.as_bytes(), &mut png, &title, &theme, &fonts, &layout)
        .context("Could not render ANSI text")?;

    write_output(out_file_path, &png)
}

fn preview(args: &ArgMatches) -> anyhow::Result<()> {
    let theme = load_theme(args)?;
    let out_file_path = output_path(args)?;
    let title = args
        .value_of("title")
        .map(String::from)
        .unwrap_or_else(|| format!("{} Color Scheme", theme.name));

    let layout = PreviewLayout::default();
    let fonts = load_fonts(args, layout.text_size, layout.title_size);

    let mut png = Vec::new();
    crate::convert_palette_to_png(&mut png, &title, &theme, &fonts, &layout)
        .context("Could not render palette preview")?;

    write_output(out_file_path, &png)
}

/// Read ANSI text from a file, or from standard input for `-`
fn read_input(input: &str) -> anyhow::Result<String> {
    let mut bytes = Vec::new();
    if input == "-" {
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("Could not read standard input")?;
    } else {
        fs::File::open(input)
            .and_then(|mut file| file.read_to_end(&mut bytes))
            .context(format!("Could not open input file: {}", input))?;
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
