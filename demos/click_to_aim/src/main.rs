use argh::FromArgs;
use std::path::PathBuf;
use std::str::FromStr;

use ptzgaze::camera::Pixel;
use ptzgaze::device::dahua::{DahuaConfig, DahuaPtzDevice, DryRunTransport};
use ptzgaze::device::{CameraProfile, PtzCamera};
use ptzgaze::orient::OrientationAngles;

/// A clicked pixel given as `X,Y`.
struct Click(Pixel);

impl FromStr for Click {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<i32>()
                .map_err(|e| format!("invalid coordinate {v:?}: {e}"))
        };
        Ok(Click(Pixel::new(parse(x)?, parse(y)?)))
    }
}

#[derive(FromArgs)]
/// Resolve clicks on a PTZ camera frame into absolute moves, without a camera
struct Args {
    /// initial pan in degrees
    #[argh(option, default = "0.0")]
    pan: f64,

    /// initial tilt in degrees
    #[argh(option, default = "0.0")]
    tilt: f64,

    /// zoom multiple
    #[argh(option, default = "1")]
    zoom: u16,

    /// path to a camera profile json, defaults to the reference camera
    #[argh(option)]
    profile: Option<PathBuf>,

    /// camera host
    #[argh(option, default = "String::from(\"192.168.1.108\")")]
    host: String,

    /// camera account name
    #[argh(option, default = "String::from(\"admin\")")]
    username: String,

    /// camera account password
    #[argh(option, default = "String::from(\"admin\")")]
    password: String,

    /// clicked pixels as X,Y
    #[argh(positional)]
    clicks: Vec<Click>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let args: Args = argh::from_env();

    let profile = match &args.profile {
        Some(path) => CameraProfile::from_json_file(path)?,
        None => CameraProfile::reference()?,
    };
    let config = DahuaConfig::new(args.host, args.username, args.password);
    log::info!("stream: {}", config.rtsp_display());

    let device = DahuaPtzDevice::new(&config, DryRunTransport::new());
    let mut camera = PtzCamera::new(device, &profile);

    // the camera is homed before the first click
    let home = camera.set_absolute_position(OrientationAngles::new(args.pan, args.tilt), args.zoom)?;
    println!("start: {home}");

    for Click(pixel) in args.clicks {
        let before = camera.position();
        match camera.aim_at(pixel) {
            Ok(position) => {
                if let Some(before) = before {
                    println!(
                        "click {}x{}: PTZ move: {} -> {}",
                        pixel.x, pixel.y, before.orientation, position.orientation
                    );
                }
            }
            Err(err) => log::error!("click {}x{} ignored: {err}", pixel.x, pixel.y),
        }
    }

    if let Some(position) = camera.position() {
        println!("final: {position}");
    }
    println!("rtsp: {}", config.rtsp_url());

    Ok(())
}
