// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#![allow(clippy::uninlined_format_args)]

use std::path;

use svgops::{Canvas, RecordingCanvas};

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

fn timed<F, T>(perf: bool, name: &str, mut f: F) -> T
where
    F: FnMut() -> T,
{
    let now = std::time::Instant::now();
    let result = f();
    if perf {
        let elapsed = now.elapsed().as_micros() as f64 / 1000.0;
        println!("{}: {:.2}ms", name, elapsed);
    }

    result
}

fn process() -> Result<(), String> {
    let mut args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            println!("{}", HELP);
            return Err(e);
        }
    };

    // Operations are printed to stdout, so the perf stats would be mixed in.
    if args.print_ops {
        args.perf = false;
    }

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    let svg_data = timed(args.perf, "Reading", || -> Result<Vec<u8>, &str> {
        if let InputFrom::File(ref file) = args.in_svg {
            std::fs::read(file).map_err(|_| "failed to open the provided file")
        } else {
            use std::io::Read;
            let mut buf = Vec::new();
            let stdin = std::io::stdin();
            let mut handle = stdin.lock();
            handle
                .read_to_end(&mut buf)
                .map_err(|_| "failed to read stdin")?;
            Ok(buf)
        }
    })?;

    let doc = timed(args.perf, "SVG Parsing", || {
        svgops::load_document(&svg_data).map_err(|e| e.to_string())
    })?;

    if args.print_ops {
        return print_ops(&args, &doc);
    }

    // fontdb initialization is pretty expensive, so perform it only when needed.
    let has_text_nodes = doc.descendants().any(|n| {
        n.tag_name() == Some(svgops::svgops_tree::ElementId::Text)
    });

    let mut fontdb = fontdb::Database::new();
    if has_text_nodes {
        timed(args.perf, "FontDB", || load_fonts(&args, &mut fontdb));
    }

    let img = render_svg(&args, &doc, &fontdb)?;

    match args.out_png {
        Some(OutputTo::Stdout) => {
            use std::io::Write;
            let buf = img.encode_png().map_err(|e| e.to_string())?;
            std::io::stdout()
                .write_all(&buf)
                .map_err(|_| "failed to write to stdout")?;
        }
        Some(OutputTo::File(ref file)) => {
            timed(args.perf, "Saving", || {
                img.save_png(file).map_err(|e| e.to_string())
            })?;
        }
        None => {}
    };

    Ok(())
}

const HELP: &str = "\
svgops turns an SVG document into 2D drawing operations and renders them.

USAGE:
  svgops [OPTIONS] <in-svg> <out-png>  # from file to file
  svgops [OPTIONS] <in-svg> -c         # from file to stdout
  svgops [OPTIONS] - <out-png>         # from stdin to file
  svgops [OPTIONS] - -c                # from stdin to stdout
  svgops --ops [OPTIONS] <in-svg>      # print drawing operations

  svgops in.svg out.png
  svgops -z 4 in.svg out.png
  svgops --ops in.svg

OPTIONS:
      --help                    Prints this help
  -V, --version                 Prints version
  -c                            Prints the output PNG to the stdout
      --ops                     Prints drawing operations instead of rendering

  -z, --zoom FACTOR             Zooms the image by a factor
  --background COLOR            Sets the background color
                                Examples: red, #fff, #fff000

  --resources-dir DIR           Sets a directory that will be used during
                                relative paths resolving.
                                Expected to be the same as the directory that
                                contains the SVG file, but can be set to any.
                                [default: input file directory]
  --max-depth DEPTH             Sets the maximum element nesting depth
                                [default: 256]

  --font-family FAMILY          Sets the default font family that will be
                                used when no 'font-family' is present
                                [default: Sans]
  --font-size SIZE              Sets the default font size that will be
                                used when no 'font-size' is present
                                [default: 12pt]
  --use-font-file PATH          Load a specified font file into the fonts database.
                                This option can be set multiple times
  --use-fonts-dir PATH          Loads all fonts from the specified directory
                                into the fonts database.
                                This option can be set multiple times
  --skip-system-fonts           Disables system fonts loading.
                                You should add some fonts manually using
                                --use-font-file and/or --use-fonts-dir
                                Otherwise, text elements will not be rendered

  --perf                        Prints performance stats
  --quiet                       Disables warnings

ARGS:
  <in-svg>                      Input file
  <out-png>                     Output file
";

#[derive(Debug)]
struct CliArgs {
    zoom: Option<f64>,
    background: Option<tiny_skia::Color>,
    print_ops: bool,

    resources_dir: Option<path::PathBuf>,
    max_depth: Option<u32>,

    font_family: Option<String>,
    font_size: Option<String>,
    font_files: Vec<path::PathBuf>,
    font_dirs: Vec<path::PathBuf>,
    skip_system_fonts: bool,

    perf: bool,
    quiet: bool,

    input: String,
    output: Option<String>,
}

fn collect_args() -> Result<CliArgs, pico_args::Error> {
    let mut input = pico_args::Arguments::from_env();

    if input.contains("--help") {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    Ok(CliArgs {
        zoom: input.opt_value_from_fn(["-z", "--zoom"], parse_zoom)?,
        background: input.opt_value_from_fn("--background", parse_background)?,
        print_ops: input.contains("--ops"),

        resources_dir: input.opt_value_from_str("--resources-dir")?,
        max_depth: input.opt_value_from_fn("--max-depth", parse_max_depth)?,

        font_family: input.opt_value_from_str("--font-family")?,
        font_size: input.opt_value_from_fn("--font-size", parse_font_size)?,
        font_files: input.values_from_str("--use-font-file")?,
        font_dirs: input.values_from_str("--use-fonts-dir")?,
        skip_system_fonts: input.contains("--skip-system-fonts"),

        perf: input.contains("--perf"),
        quiet: input.contains("--quiet"),

        input: input.free_from_str()?,
        output: input.opt_free_from_str()?,
    })
}

fn parse_zoom(s: &str) -> Result<f64, String> {
    let n: f64 = s.parse().map_err(|_| "invalid zoom factor")?;

    if n > 0.0 {
        Ok(n)
    } else {
        Err("ZOOM should be positive".to_string())
    }
}

fn parse_max_depth(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid number")?;

    if n > 0 {
        Ok(n)
    } else {
        Err("DEPTH cannot be zero".to_string())
    }
}

fn parse_font_size(s: &str) -> Result<String, String> {
    match svgops::svgops_types::size(s) {
        Ok(n) if n > 0.0 => Ok(s.to_string()),
        Ok(_) => Err("font size should be positive".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_background(s: &str) -> Result<tiny_skia::Color, String> {
    let c = svgops::svgops_types::color(s, 1.0).map_err(|e| e.to_string())?;
    tiny_skia::Color::from_rgba(c.red as f32, c.green as f32, c.blue as f32, c.alpha as f32)
        .ok_or_else(|| "invalid color".to_string())
}

#[derive(Clone, PartialEq, Debug)]
enum InputFrom {
    Stdin,
    File(path::PathBuf),
}

#[derive(Clone, PartialEq, Debug)]
enum OutputTo {
    Stdout,
    File(path::PathBuf),
}

struct Args {
    in_svg: InputFrom,
    out_png: Option<OutputTo>,
    print_ops: bool,
    perf: bool,
    quiet: bool,
    opt: svgops::Options,
    zoom: f64,
    background: Option<tiny_skia::Color>,

    font_files: Vec<path::PathBuf>,
    font_dirs: Vec<path::PathBuf>,
    skip_system_fonts: bool,
}

fn parse_args() -> Result<Args, String> {
    let args = collect_args().map_err(|e| e.to_string())?;

    let (in_svg, out_png) = {
        let in_svg = args.input.as_str();

        let svg_from = if in_svg == "-" {
            InputFrom::Stdin
        } else if in_svg == "-c" {
            return Err("-c should be set after input".to_string());
        } else {
            InputFrom::File(in_svg.into())
        };

        let out_png = if let Some(ref out_png) = args.output {
            if out_png == "-c" {
                Some(OutputTo::Stdout)
            } else {
                Some(OutputTo::File(out_png.into()))
            }
        } else {
            None
        };

        (svg_from, out_png)
    };

    if !args.print_ops && out_png.is_none() {
        return Err("<out-png> must be set".to_string());
    }

    if args.input == "-" && args.resources_dir.is_none() {
        eprintln!("Warning: Make sure to set --resources-dir when reading SVG from stdin.");
    }

    let resources_dir = match args.resources_dir {
        Some(v) => Some(v),
        None if args.input != "-" => {
            // Get input file absolute directory.
            std::fs::canonicalize(&args.input)
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        }
        None => None,
    };

    let default = svgops::Options::default();
    let opt = svgops::Options {
        resources_dir,
        font_family: args.font_family.unwrap_or(default.font_family),
        font_size: args.font_size.unwrap_or(default.font_size),
        default_size: default.default_size,
        max_depth: args.max_depth.unwrap_or(default.max_depth),
    };

    Ok(Args {
        in_svg,
        out_png,
        print_ops: args.print_ops,
        perf: args.perf,
        quiet: args.quiet,
        opt,
        zoom: args.zoom.unwrap_or(1.0),
        background: args.background,
        font_files: args.font_files,
        font_dirs: args.font_dirs,
        skip_system_fonts: args.skip_system_fonts,
    })
}

fn load_fonts(args: &Args, fontdb: &mut fontdb::Database) {
    if !args.skip_system_fonts {
        fontdb.load_system_fonts();
    }

    for path in &args.font_files {
        if let Err(e) = fontdb.load_font_file(path) {
            log::warn!("Failed to load '{}' cause {}.", path.display(), e);
        }
    }

    for path in &args.font_dirs {
        fontdb.load_fonts_dir(path);
    }
}

fn print_ops(args: &Args, doc: &svgops::Document) -> Result<(), String> {
    use std::io::Write;

    let mut canvas = RecordingCanvas::new();
    if args.zoom != 1.0 {
        canvas.scale(args.zoom, args.zoom);
    }

    // Operations recorded before an error are still printed.
    let result = svgops::render(doc, &args.opt, &mut canvas);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for op in canvas.ops() {
        writeln!(out, "{}", op).map_err(|_| "failed to write to stdout")?;
    }

    result.map_err(|e| e.to_string())
}

fn render_svg(
    args: &Args,
    doc: &svgops::Document,
    fontdb: &fontdb::Database,
) -> Result<tiny_skia::Pixmap, String> {
    let now = std::time::Instant::now();

    let (width, height) = svgops::image_size(doc, &args.opt).map_err(|e| e.to_string())?;
    let width = (width * args.zoom).ceil();
    let height = (height * args.zoom).ceil();
    if !(width >= 1.0 && height >= 1.0) {
        return Err("target size is zero".to_string());
    }

    let mut pixmap = tiny_skia::Pixmap::new(width as u32, height as u32)
        .ok_or_else(|| "target size is too big".to_string())?;

    if let Some(background) = args.background {
        pixmap.fill(background);
    }

    {
        let mut canvas = svgops::SkiaCanvas::new(pixmap.as_mut()).with_fontdb(fontdb);
        canvas.scale(args.zoom, args.zoom);
        svgops::render(doc, &args.opt, &mut canvas).map_err(|e| e.to_string())?;
    }

    if args.perf {
        let elapsed = now.elapsed().as_micros() as f64 / 1000.0;
        println!("Rendering: {:.2}ms", elapsed);
    }

    Ok(pixmap)
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
