use rps_io_lib as rps;

use std::path::{Path, PathBuf};
use std::str::FromStr;

// Default values for some of the program arguments.
const DEFAULT_EXT: &str = "png";
const DEFAULT_DELAY: u64 = 0;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Entry point of the program.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_LEVEL))
        .init();
    parse_args()
        .and_then(run)
        .unwrap_or_else(|err| eprintln!("Error: {:?}", err));
}

fn display_help() {
    eprintln!(
        r#"
rps-io

Inspect photometric stereo data: lights, images and normals.

USAGE:
    rps-io [FLAGS...] COMMAND [OPTIONS...] PATH
    For example:
        rps-io images --ext png data/bunny/

COMMANDS:
    lights FILE            # Print the light matrix of a .txt or .npy file
    images FOLDER          # Print the size of the measurement matrix of a folder
    render NORMALS.npy     # Save the normal map as an image (requires --height, --width, --out)
    show NORMALS.npy       # Display the normal map (requires --height, --width)

FLAGS:
    --help                 # Print this message and exit
    --version              # Print version and exit

OPTIONS:
    --ext string           # Extension of the images in the folder (default: {})
    --height int           # Height of the normal map
    --width int            # Width of the normal map
    --out file.png         # Output image file of the normal map
    --delay int            # Display duration in ms, 0 waits for a key press (default: {})

The log level is set with the RUST_LOG environment variable (default: {}).
"#,
        DEFAULT_EXT, DEFAULT_DELAY, DEFAULT_LOG_LEVEL,
    )
}

#[derive(Debug)]
/// Type holding command line arguments.
enum Args {
    Lights(PathBuf),
    Images {
        folder: PathBuf,
        ext: String,
    },
    Render {
        normals: PathBuf,
        shape: Shape,
        out: PathBuf,
    },
    Show {
        normals: PathBuf,
        shape: Shape,
        delay: u64,
    },
}

#[derive(Debug, Clone, Copy)]
struct Shape {
    height: usize,
    width: usize,
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Lights,
    Images,
    Render,
    Show,
}

impl FromStr for Command {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lights" => Ok(Command::Lights),
            "images" => Ok(Command::Images),
            "render" => Ok(Command::Render),
            "show" => Ok(Command::Show),
            other => Err(format!(
                "Unknown command {:?}. Use --help to know how to use this tool.",
                other
            )),
        }
    }
}

/// Function parsing the command line arguments and returning an Args object or an error.
fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    parse_from(pico_args::Arguments::from_env())
}

fn parse_from(mut args: pico_args::Arguments) -> Result<Args, Box<dyn std::error::Error>> {

    // Retrieve command line arguments.
    let help = args.contains(["-h", "--help"]);
    let version = args.contains(["-v", "--version"]);

    // Check if the --help or --version flags are present.
    if help {
        display_help();
        std::process::exit(0);
    } else if version {
        println!("{}", std::env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    let command: Command = match args.subcommand()? {
        Some(cmd) => cmd.parse()?,
        None => return Err("Missing command. Use --help to know how to use this tool.".into()),
    };

    // Options, not all of them apply to every command.
    let ext = args
        .opt_value_from_str("--ext")?
        .unwrap_or_else(|| DEFAULT_EXT.to_string());
    let height: Option<usize> = args.opt_value_from_str("--height")?;
    let width: Option<usize> = args.opt_value_from_str("--width")?;
    let out: Option<String> = args.opt_value_from_str("--out")?;
    let delay = args
        .opt_value_from_str("--delay")?
        .unwrap_or(DEFAULT_DELAY);

    // The single free argument is the input path.
    let path = match args.free()?.as_slice() {
        [path] => PathBuf::from(path),
        [] => return Err("Missing input path".into()),
        _ => return Err("Too many input paths".into()),
    };

    let shape = || -> Result<Shape, Box<dyn std::error::Error>> {
        match (height, width) {
            (Some(height), Some(width)) => Ok(Shape { height, width }),
            _ => Err("Both --height and --width are required".into()),
        }
    };

    Ok(match command {
        Command::Lights => Args::Lights(path),
        Command::Images => Args::Images { folder: path, ext },
        Command::Render => Args::Render {
            normals: path,
            shape: shape()?,
            out: PathBuf::from(out.ok_or("--out is required")?),
        },
        Command::Show => Args::Show {
            normals: path,
            shape: shape()?,
            delay,
        },
    })
}

/// Start actual program with command line arguments successfully parsed.
fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    match args {
        Args::Lights(path) => {
            let lights = load_lights(&path)?;
            println!("{} lights:{}", lights.ncols(), lights);
        }
        Args::Images { folder, ext } => {
            let now = std::time::Instant::now();
            let measurements = rps::load_images(Some(&folder), Some(ext.as_str()))?;
            log::info!("Loading took {:.1} s", now.elapsed().as_secs_f32());
            if measurements.is_empty() {
                return Err(format!("There is no *.{} image in {:?}", ext, folder).into());
            }
            let (nb_pixels, nb_images) = measurements.matrix.shape();
            println!(
                "{} images of {}x{} (width x height): measurement matrix of {} x {}",
                nb_images, measurements.width, measurements.height, nb_pixels, nb_images
            );
        }
        Args::Render {
            normals,
            shape,
            out,
        } => {
            let normals = rps::load_normalarray(Some(&normals))?;
            rps::save_normal_map_image(Some(&out), Some(&normals), shape.height, shape.width)?;
            log::info!("Normal map saved to {:?}", out);
        }
        Args::Show {
            normals,
            shape,
            delay,
        } => {
            let normals = rps::load_normalarray(Some(&normals))?;
            rps::disp_normalarray(Some(&normals), shape.height, shape.width, delay)?;
        }
    }
    Ok(())
}

/// Load lights with the loader matching the file extension.
fn load_lights(path: &Path) -> Result<rps::Lights, rps::Error> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("npy") => rps::load_lightnpy(Some(path)),
        _ => rps::load_lighttxt(Some(path)),
    }
}
