//! Command-line front end: render a Gerber paste layer into an STL stencil.

use std::{env, path::PathBuf, process::ExitCode};

use gerber_stencil::{
    config::RenderConfig,
    float_types::Real,
    io::stl::{StlFormat, write_stl},
    pipeline::Stencil,
    raster::Bounds,
};
use tracing::{error, info};

const USAGE: &str = "\
Usage: gerber-stencil [OPTIONS] <GERBER>

Arguments:
  <GERBER>  Gerber (RS-274X) paste layer to render

Options:
  -H, --height <MM>       Stencil thickness in millimeters [default: 0.2]
  -d, --dpi <N>           Raster resolution in dots per inch [default: 1000]
  -k, --keep-png          Also write the intermediate raster as <output>.png
      --ascii             Write ASCII STL instead of binary
  -o, --output <PATH>     Output STL path [default: <GERBER> with .stl]
      --bounds <A,B,C,D>  Render area minx,miny,maxx,maxy in drawing units
  -h, --help              Print this help message

Set RUST_LOG to control log output (default: gerber_stencil=info).";

struct Options {
    input: PathBuf,
    output: PathBuf,
    format: StlFormat,
    config: RenderConfig,
}

enum Action {
    Render(Box<Options>),
    Help,
}

fn parse_number(flag: &str, value: Option<String>) -> Result<Real, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value\n\n{USAGE}"))?;
    value
        .parse::<Real>()
        .map_err(|e| format!("invalid value for {flag}: {value}: {e}"))
}

fn parse_bounds(value: Option<String>) -> Result<Bounds, String> {
    let value = value.ok_or_else(|| format!("--bounds needs a value\n\n{USAGE}"))?;
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<Real>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid --bounds {value}: {e}"))?;
    match parts.as_slice() {
        &[min_x, min_y, max_x, max_y] => Ok(Bounds::new(min_x, min_y, max_x, max_y)),
        _ => Err(format!("--bounds takes four comma-separated numbers, got {value}")),
    }
}

fn parse_args() -> Result<Action, String> {
    let mut args = env::args().skip(1);
    let mut config = RenderConfig::default();
    let mut format = StlFormat::Binary;
    let mut output = None;
    let mut input = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Action::Help),
            "-H" | "--height" => {
                config = config.with_extrusion_height(parse_number(&arg, args.next())?);
            },
            "-d" | "--dpi" => config = config.with_dpi(parse_number(&arg, args.next())?),
            "-k" | "--keep-png" => config = config.with_keep_raster(true),
            "--ascii" => format = StlFormat::Ascii,
            "-o" | "--output" => {
                let path = args
                    .next()
                    .ok_or_else(|| format!("{arg} needs a value\n\n{USAGE}"))?;
                output = Some(PathBuf::from(path));
            },
            "--bounds" => config = config.with_bounds(parse_bounds(args.next())?),
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!("unknown option {flag}\n\n{USAGE}"));
            },
            _ if input.is_none() => input = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument {arg}\n\n{USAGE}")),
        }
    }

    let input = input.ok_or_else(|| USAGE.to_string())?;
    let output = output.unwrap_or_else(|| input.with_extension("stl"));
    config.validate().map_err(|e| e.to_string())?;

    Ok(Action::Render(Box::new(Options {
        input,
        output,
        format,
        config,
    })))
}

fn render(options: &Options) -> Result<(), gerber_stencil::StencilError> {
    let stencil = Stencil::from_path(&options.input, &options.config)?;

    #[cfg(feature = "image-io")]
    {
        let png = options.output.with_extension("png");
        if stencil.keep_raster(&options.config, &png)? {
            info!(path = %png.display(), "wrote raster");
        }
    }
    #[cfg(not(feature = "image-io"))]
    if options.config.keep_raster {
        tracing::warn!("--keep-png needs the image-io feature; raster not written");
    }

    write_stl(&stencil.solid, &options.output, options.format)
}

fn main() -> ExitCode {
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "gerber_stencil=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    match parse_args() {
        Ok(Action::Help) => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        },
        Ok(Action::Render(options)) => match render(&options) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!(input = %options.input.display(), "{e}");
                ExitCode::FAILURE
            },
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
