//! Main arm executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logging and parameters
//!     - Drive the neutral pose and wait for the servos to settle
//!     - Main loop, once per cycle:
//!         - Read the stick samples
//!         - Run a control loop tick (joystick, arm control, servos)
//!         - Archive the tick
//!         - Sleep until the start of the next cycle
//!
//! # Usage
//!
//!     arm_exec [SCRIPT]
//!
//! If `SCRIPT` is given the stick samples are replayed from that CSV file and
//! the executable exits when the script ends. Otherwise the stick is held
//! centred and the arm holds its neutral pose.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{debug, info, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use arm_lib::{
    arm_ctrl,
    control_loop::ControlLoop,
    joystick,
    params::ArmExecParams,
    sample_src::{ConstSource, SampleSource, ScriptedSource},
    servo_ctrl::{self, LogPort},
};
use util::{
    archive::{Archived, Archiver},
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("arm_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Joystick Arm Control Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: ArmExecParams =
        util::params::load("arm_exec.toml").wrap_err("Could not load exec params")?;
    let joystick_params: joystick::Params =
        util::params::load("joystick.toml").wrap_err("Could not load joystick params")?;
    let arm_ctrl_params: arm_ctrl::Params =
        util::params::load("arm_ctrl.toml").wrap_err("Could not load arm_ctrl params")?;
    let servo_params: servo_ctrl::Params =
        util::params::load("servo_ctrl.toml").wrap_err("Could not load servo_ctrl params")?;

    if !(exec_params.cycle_period_s > 0.0) {
        return Err(eyre!(
            "Cycle period must be positive, found {} s",
            exec_params.cycle_period_s
        ));
    }

    // Keep a copy of what this session ran with
    session.save("params/arm_exec.json", exec_params.clone());
    session.save("params/joystick.json", joystick_params.clone());
    session.save("params/arm_ctrl.json", arm_ctrl_params.clone());
    session.save("params/servo_ctrl.json", servo_params.clone());

    info!("Parameters loaded");

    // ---- INITIALISE SAMPLE SOURCE ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    let mut sample_src: Box<dyn SampleSource> = match args.len() {
        // If we have a single argument use it as the script path
        2 => {
            info!("Loading sample script from \"{}\"", &args[1]);
            Box::new(ScriptedSource::from_path(&args[1]).wrap_err("Failed to load script")?)
        }
        1 => {
            warn!("No sample script provided, the stick will be held centred\n");
            Box::new(ConstSource::default())
        }
        _ => {
            return Err(eyre!(
                "Expected either zero or one argument, found {}",
                args.len() - 1
            ))
        }
    };

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut ctrl = ControlLoop::new(joystick_params, arm_ctrl_params, servo_params)
        .wrap_err("Failed to initialise the control loop")?;

    if exec_params.archive {
        ctrl.set_archiver(
            Archiver::from_path(&session, "control_loop.csv")
                .wrap_err("Failed to open the control loop archive")?,
        );
        info!("Archiving enabled");
    }

    info!("Module initialisation complete\n");

    // ---- STARTUP POSE ----

    let mut port = LogPort::default();

    info!("Getting ready...");
    ctrl.startup(&mut port)
        .wrap_err("Failed to drive the neutral pose")?;
    thread::sleep(Duration::from_secs_f64(exec_params.settle_time_s.max(0.0)));
    info!("Done. Joystick control enabled.\n");

    // ---- MAIN LOOP ----

    let cycle_period = Duration::from_secs_f64(exec_params.cycle_period_s);

    info!("Begining main loop\n");

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // ---- DATA INPUT ----

        let samples = match sample_src.read().wrap_err("Failed to read stick samples")? {
            Some(s) => s,
            None => {
                info!("End of sample script reached");
                break;
            }
        };

        // ---- CONTROL ----

        if let Err(e) = ctrl.tick(&samples, &mut port) {
            warn!("Control loop error: {}", e);
        }

        // ---- WRITE ARCHIVES ----

        if let Err(e) = ctrl.write() {
            warn!("Could not write the control loop archive: {}", e);
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => thread::sleep(d),
            None => warn!(
                "Cycle overran by {:.06} s",
                cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
            ),
        }
    }

    // ---- SHUTDOWN ----

    if let Some(t) = ctrl.last_tick() {
        info!(
            "Ran {} cycles, final target {:?}, final angles {:?}, {} targets rejected",
            ctrl.num_ticks(),
            t.arm_state,
            t.angles,
            t.arm_ctrl.num_rejected
        );
    }

    session.exit();

    info!("End of execution");

    Ok(())
}
