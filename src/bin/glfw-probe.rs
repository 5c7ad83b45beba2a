// src/bin/glfw-probe.rs

//! Probe binary: loads the native library, dumps monitor and video-mode
//! information, then opens a window and pumps events until it is closed.
//!
//! An optional argument names a JSON window configuration file.

use anyhow::Context;
use glfw_bind::{Session, WindowConfig};
use log::{info, warn};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file '{path}'"))?;
            WindowConfig::from_json_str(&raw)
                .with_context(|| format!("failed to parse config file '{path}'"))?
        }
        None => WindowConfig::default(),
    };

    let mut session = Session::init().context("failed to initialize the windowing library")?;

    let (major, minor, rev) = session.version();
    info!("native library {major}.{minor}.{rev} ({})", session.version_string());

    session.set_error_callback(|code, description| {
        warn!("windowing error {code:?}: {description}");
    });
    session.set_monitor_callback(|monitor, event| {
        info!("monitor {monitor:?}: {event:?}");
    });

    let monitors = session.monitors();
    info!("{} monitor(s) connected", monitors.len());
    for monitor in monitors {
        let name = session.monitor_name(monitor);
        let (x, y) = session.monitor_pos(monitor);
        let (width_mm, height_mm) = session.monitor_physical_size(monitor);
        info!("  {name} at ({x}, {y}), {width_mm}x{height_mm} mm");
        if let Some(mode) = session.video_mode(monitor) {
            info!(
                "  current mode: {}",
                serde_json::to_string(&mode).context("failed to serialize video mode")?
            );
        }
        let modes = session.video_modes(monitor);
        info!("  {} supported mode(s)", modes.len());
    }

    let window = session
        .create_window_from(&config)
        .context("window title could not cross the boundary")?;
    if window.is_none() {
        anyhow::bail!("window creation failed; see the error log above");
    }

    session.set_window_size_callback(|_, width, height| {
        info!("resized to {width}x{height}");
    });
    session.set_window_close_callback(|_| {
        info!("close requested");
    });
    session.set_key_callback(|_, key, scancode, action, mods| {
        info!("key {key:?} (scancode {scancode}) {action:?} mods={mods:?}");
    });

    session.make_context_current(window);
    info!("entering event loop; close the window to exit");
    while !session.window_should_close(window) {
        session.poll_events();
        session.swap_buffers(window);
    }

    session.destroy_window(window);
    info!("window destroyed, exiting");
    Ok(())
}
