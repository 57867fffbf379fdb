//! Offline plan display executable.
//!
//! Draws a plan, and optionally a position along it, into a PNG image in the same way the plan
//! display layer draws it on a map.
//!
//! The plan and track are read from JSON files and published on an in-process bus, which the
//! display layer is subscribed to, before a single frame is drawn.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{info, warn};
use std::{fs::File, io::BufReader, path::PathBuf};
use structopt::StructOpt;

// Internal
use comms_if::{
    bus::TopicBus,
    nav::{Plan, PlanTrack},
};
use plan_lib::{
    plugin::{DisplayPlugin, NavPlanPlugin},
    render::{RasterCanvas, Rgba},
    status::StatusLevel,
    tf::{StaticTransforms, TfParams},
};
use util::{
    logger::{logger_init_with, LogParams},
    params::LoadError,
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Topic plans are published on when no settings file gives one
const DEFAULT_PLAN_TOPIC: &str = "/plan";

/// Topic plan tracks are published on when no settings file gives one
const DEFAULT_TRACK_TOPIC: &str = "/plan_track";

/// Name of the transforms file looked for in the parameters directory
const TRANSFORMS_FILE_NAME: &str = "transforms.toml";

/// Name of the settings file saved into the session directory
const SETTINGS_FILE_NAME: &str = "plan_display.toml";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Draw a navigation plan into an image.
#[derive(Debug, StructOpt)]
#[structopt(name = "plan_exec")]
struct Opts {
    /// JSON file containing the plan to draw.
    #[structopt(long, parse(from_os_str))]
    plan: PathBuf,

    /// JSON file containing a position along the plan.
    #[structopt(long, parse(from_os_str))]
    track: Option<PathBuf>,

    /// TOML file of display settings (topics, colours and draw style).
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// TOML file of frame transforms. Defaults to `transforms.toml` in `$PLAN_VIZ_ROOT/params` if
    /// it exists, otherwise the plan must already be in the display frame.
    #[structopt(long, parse(from_os_str))]
    transforms: Option<PathBuf>,

    /// Display frame to use when no transforms file is given.
    #[structopt(long, default_value = "/wgs84")]
    frame: String,

    /// PNG file to draw the plan into.
    #[structopt(long, parse(from_os_str), default_value = "plan.png")]
    out: PathBuf,

    /// PNG file to write the layer icon into.
    #[structopt(long, parse(from_os_str))]
    icon: Option<PathBuf>,

    /// Image width in pixels.
    #[structopt(long, default_value = "800")]
    width: u32,

    /// Image height in pixels.
    #[structopt(long, default_value = "600")]
    height: u32,

    /// Display frame X coordinate at the centre of the image.
    #[structopt(long, default_value = "0.0", allow_hyphen_values = true)]
    center_x: f64,

    /// Display frame Y coordinate at the centre of the image.
    #[structopt(long, default_value = "0.0", allow_hyphen_values = true)]
    center_y: f64,

    /// Display frame units per pixel.
    #[structopt(long, default_value = "0.1")]
    scale: f64,

    /// Lowest level logged: info, debug or trace.
    #[structopt(long, default_value = "debug")]
    log_level: String,

    /// Directory sessions are created in.
    #[structopt(long, parse(from_os_str), default_value = "sessions")]
    sessions: PathBuf,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    let session =
        Session::new("plan_exec", &opts.sessions).wrap_err("Failed to create the session")?;

    let log_params = LogParams {
        level: opts.log_level.clone(),
        ..Default::default()
    };
    logger_init_with(&log_params, &session).wrap_err("Failed to initialise logging")?;

    info!("Plan Display Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD MESSAGES AND PARAMETERS ----

    let plan: Plan = load_json(&opts.plan).wrap_err("Could not load the plan")?;
    info!(
        "Loaded plan \"{}\" with {} points in frame \"{}\"",
        plan.id,
        plan.points.len(),
        plan.header.frame_id
    );

    let track: Option<PlanTrack> = match opts.track {
        Some(ref p) => Some(load_json(p).wrap_err("Could not load the plan track")?),
        None => None,
    };

    let tf_params: Option<TfParams> = match opts.transforms {
        Some(ref p) => Some(util::params::load_path(p).wrap_err("Could not load the transforms")?),
        None => load_root_params(TRANSFORMS_FILE_NAME)?,
    };

    let tf = match tf_params {
        Some(ref params) => StaticTransforms::from_params(params),
        None => {
            info!("No transforms loaded, displaying in {}", opts.frame);
            StaticTransforms::new(&opts.frame)
        }
    };

    // ---- INITIALISE DISPLAY ----

    let bus: TopicBus = TopicBus::new();
    let mut plugin = NavPlanPlugin::new(bus.clone(), tf);

    plugin
        .set_topic(DEFAULT_PLAN_TOPIC)
        .wrap_err("Could not subscribe to the plan topic")?;
    plugin
        .set_position_topic(DEFAULT_TRACK_TOPIC)
        .wrap_err("Could not subscribe to the plan track topic")?;

    if let Some(ref p) = opts.config {
        plugin
            .load_config_path(p)
            .wrap_err("Could not load the display settings")?;
    }

    if !plugin.initialise(RasterCanvas::new(opts.width, opts.height, Rgba::WHITE)) {
        return Err(eyre!("The plan display failed to initialise"));
    }

    // ---- PUBLISH AND DRAW ----

    let settings = plugin.settings().clone();

    if settings.topic.is_empty() {
        warn!("No plan topic is set, the plan will not be received");
    } else {
        bus.publish(&settings.topic, plan)
            .wrap_err("Could not publish the plan")?;
    }

    if let Some(track) = track {
        if settings.position_topic.is_empty() {
            warn!("No plan track topic is set, the track will not be received");
        } else {
            bus.publish(&settings.position_topic, track)
                .wrap_err("Could not publish the plan track")?;
        }
    }

    plugin.process_messages();
    plugin.draw(opts.center_x, opts.center_y, opts.scale);

    let status = plugin.status().clone();
    match status.level() {
        StatusLevel::Info => info!("Plan display status: {}", status),
        _ => warn!("Plan display status: {}", status),
    }

    // ---- SAVE OUTPUTS ----

    let canvas = plugin
        .take_canvas()
        .ok_or_else(|| eyre!("The plan display has no canvas"))?;
    canvas
        .save(&opts.out)
        .wrap_err_with(|| format!("Could not save the image to {:?}", opts.out))?;
    info!("Plan image saved to {:?}", opts.out);

    if let Some(ref p) = opts.icon {
        plugin
            .icon()
            .save(p)
            .wrap_err_with(|| format!("Could not save the icon to {:?}", p))?;
        info!("Icon saved to {:?}", p);
    }

    plugin
        .save_config_path(session.path(SETTINGS_FILE_NAME))
        .wrap_err("Could not save the display settings")?;

    info!("End of execution");

    Ok(())
}

/// Load a parameter file from `$PLAN_VIZ_ROOT/params`, or `None` if the root isn't set or the
/// file can't be read.
fn load_root_params<P>(file_name: &str) -> Result<Option<P>, Report>
where
    P: serde::de::DeserializeOwned,
{
    match util::params::load(file_name) {
        Ok(p) => Ok(Some(p)),
        Err(LoadError::RootNotSet) | Err(LoadError::FileLoadError(_)) => Ok(None),
        Err(e) => Err(e).wrap_err_with(|| format!("Could not load {}", file_name)),
    }
}

/// Load a message from a JSON file.
fn load_json<T, P>(path: P) -> Result<T, Report>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<std::path::Path>,
{
    let file = File::open(path.as_ref())
        .wrap_err_with(|| format!("Could not open {:?}", path.as_ref()))?;

    Ok(serde_json::from_reader(BufReader::new(file))?)
}
