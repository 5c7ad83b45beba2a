// src/marshal.rs

//! Decoding of native buffers into owned host values.
//!
//! Enumeration queries hand back pointers into memory the native library may
//! free or rewrite on its very next call, so everything here copies eagerly:
//! the returned values are snapshots with no tie to the native buffer.

use crate::ffi;
use crate::handle::MonitorHandle;
use libc::c_int;
use log::warn;
use serde::{Deserialize, Serialize};

/// Number of samples per gamma channel. Fixed by contract.
pub const GAMMA_RAMP_SIZE: usize = 256;

/// A display configuration reported by a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoMode {
    pub width: i32,
    pub height: i32,
    pub red_bits: i32,
    pub green_bits: i32,
    pub blue_bits: i32,
    pub refresh_rate: i32,
}

impl VideoMode {
    pub fn from_raw(raw: &ffi::GLFWvidmode) -> Self {
        VideoMode {
            width: raw.width,
            height: raw.height,
            red_bits: raw.redBits,
            green_bits: raw.greenBits,
            blue_bits: raw.blueBits,
            refresh_rate: raw.refreshRate,
        }
    }

    pub fn to_raw(self) -> ffi::GLFWvidmode {
        ffi::GLFWvidmode {
            width: self.width,
            height: self.height,
            redBits: self.red_bits,
            greenBits: self.green_bits,
            blueBits: self.blue_bits,
            refreshRate: self.refresh_rate,
        }
    }
}

/// Reads a single video-mode record, if the native call produced one.
///
/// # Safety
/// `raw` must be null or point to a readable `GLFWvidmode`.
pub unsafe fn video_mode_at(raw: *const ffi::GLFWvidmode) -> Option<VideoMode> {
    if raw.is_null() {
        return None;
    }
    Some(VideoMode::from_raw(&*raw))
}

/// Decodes a native array of `count` consecutive video-mode records.
///
/// A null base or non-positive count yields an empty Vec without touching
/// the buffer.
///
/// # Safety
/// If `count > 0`, `base` must point to at least `count` readable records.
pub unsafe fn video_mode_array(base: *const ffi::GLFWvidmode, count: c_int) -> Vec<VideoMode> {
    if base.is_null() || count <= 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(base, count as usize)
        .iter()
        .map(VideoMode::from_raw)
        .collect()
}

/// Decodes a native array of `count` consecutive monitor addresses.
///
/// # Safety
/// If `count > 0`, `base` must point to at least `count` readable pointers.
pub unsafe fn monitor_array(
    base: *const *mut ffi::GLFWmonitor,
    count: c_int,
) -> Vec<MonitorHandle> {
    if base.is_null() || count <= 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(base, count as usize)
        .iter()
        .map(|&raw| MonitorHandle::from_raw(raw))
        .collect()
}

/// Per-channel gamma lookup tables, exactly 256 samples each.
///
/// The fixed-size arrays enforce the 256-sample contract on the encode path
/// at the type level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GammaRamp {
    pub red: [u16; GAMMA_RAMP_SIZE],
    pub green: [u16; GAMMA_RAMP_SIZE],
    pub blue: [u16; GAMMA_RAMP_SIZE],
}

impl GammaRamp {
    /// The identity ramp: each channel maps input level i to i * 257, which
    /// spreads 0..=255 linearly over the full 16-bit range.
    pub fn linear() -> Self {
        let mut channel = [0u16; GAMMA_RAMP_SIZE];
        for (i, sample) in channel.iter_mut().enumerate() {
            *sample = (i as u16) * 257;
        }
        GammaRamp {
            red: channel,
            green: channel,
            blue: channel,
        }
    }

    /// Borrows the three channels as a native ramp descriptor and hands it
    /// to `call`. The descriptor's channel pointers are only valid inside
    /// `call`; the closure shape keeps them from escaping the borrow. The
    /// native side reads the buffers synchronously and does not retain them.
    pub fn with_raw<R>(&self, call: impl FnOnce(*const ffi::GLFWgammaramp) -> R) -> R {
        let raw = ffi::GLFWgammaramp {
            // Read-only on the native side for a set call.
            red: self.red.as_ptr() as *mut u16,
            green: self.green.as_ptr() as *mut u16,
            blue: self.blue.as_ptr() as *mut u16,
            size: GAMMA_RAMP_SIZE as u32,
        };
        call(&raw)
    }

    /// Copies a native ramp descriptor out into owned channels.
    ///
    /// Ramps of any size other than 256 violate the binding contract and are
    /// rejected rather than truncated or padded.
    ///
    /// # Safety
    /// `raw` must be null or point to a descriptor whose channel pointers
    /// are readable for `size` samples each.
    pub unsafe fn from_raw(raw: *const ffi::GLFWgammaramp) -> Option<GammaRamp> {
        if raw.is_null() {
            return None;
        }
        let descriptor = &*raw;
        if descriptor.size as usize != GAMMA_RAMP_SIZE {
            warn!(
                "native gamma ramp has {} samples per channel, expected {}; rejecting",
                descriptor.size,
                GAMMA_RAMP_SIZE
            );
            return None;
        }
        if descriptor.red.is_null() || descriptor.green.is_null() || descriptor.blue.is_null() {
            warn!("native gamma ramp has a null channel pointer; rejecting");
            return None;
        }
        let mut ramp = GammaRamp {
            red: [0; GAMMA_RAMP_SIZE],
            green: [0; GAMMA_RAMP_SIZE],
            blue: [0; GAMMA_RAMP_SIZE],
        };
        ramp.red
            .copy_from_slice(std::slice::from_raw_parts(descriptor.red, GAMMA_RAMP_SIZE));
        ramp.green.copy_from_slice(std::slice::from_raw_parts(
            descriptor.green,
            GAMMA_RAMP_SIZE,
        ));
        ramp.blue.copy_from_slice(std::slice::from_raw_parts(
            descriptor.blue,
            GAMMA_RAMP_SIZE,
        ));
        Some(ramp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;
    use test_log::test; // logs from rejected ramps show up under RUST_LOG

    fn mode(width: i32, refresh: i32) -> ffi::GLFWvidmode {
        ffi::GLFWvidmode {
            width,
            height: width * 3 / 4,
            redBits: 8,
            greenBits: 8,
            blueBits: 8,
            refreshRate: refresh,
        }
    }

    #[test]
    fn zero_count_never_touches_the_buffer() {
        // A dangling, never-dereferenced base address.
        let dangling = 0x1000 as *const ffi::GLFWvidmode;
        assert!(unsafe { video_mode_array(dangling, 0) }.is_empty());
        assert!(unsafe { video_mode_array(ptr::null(), 0) }.is_empty());
        assert!(unsafe { video_mode_array(ptr::null(), 5) }.is_empty());
        assert!(unsafe { monitor_array(ptr::null(), 0) }.is_empty());
        assert!(unsafe { monitor_array(0x2000 as *const _, -1) }.is_empty());
    }

    #[test]
    fn video_mode_arrays_decode_in_order() {
        for count in [1usize, 16] {
            let raw: Vec<ffi::GLFWvidmode> =
                (0..count).map(|i| mode(640 + i as i32 * 8, 60)).collect();
            let decoded = unsafe { video_mode_array(raw.as_ptr(), raw.len() as c_int) };
            assert_eq!(decoded.len(), count);
            for (i, m) in decoded.iter().enumerate() {
                assert_eq!(m.width, 640 + i as i32 * 8);
                assert_eq!(m.refresh_rate, 60);
                assert_eq!(m.red_bits, 8);
            }
        }
    }

    #[test]
    fn decoded_modes_are_snapshots() {
        let mut raw = vec![mode(800, 60)];
        let decoded = unsafe { video_mode_array(raw.as_ptr(), 1) };
        // Rewriting the native buffer must not affect the decoded copy.
        raw[0].width = 1;
        assert_eq!(decoded[0].width, 800);
    }

    #[test]
    fn monitor_arrays_decode_in_order() {
        for count in [1usize, 16] {
            let raw: Vec<*mut ffi::GLFWmonitor> = (0..count)
                .map(|i| (0x1000 + i * 0x10) as *mut ffi::GLFWmonitor)
                .collect();
            let decoded = unsafe { monitor_array(raw.as_ptr(), raw.len() as c_int) };
            assert_eq!(decoded.len(), count);
            for (i, handle) in decoded.iter().enumerate() {
                assert_eq!(handle.as_raw() as usize, 0x1000 + i * 0x10);
            }
        }
    }

    #[test]
    fn single_mode_reads_through_pointer() {
        let raw = mode(1920, 144);
        let decoded = unsafe { video_mode_at(&raw) }.unwrap();
        assert_eq!(decoded.width, 1920);
        assert_eq!(decoded.refresh_rate, 144);
        assert_eq!(unsafe { video_mode_at(ptr::null()) }, None);
    }

    #[test]
    fn gamma_ramp_round_trips_through_raw() {
        let ramp = GammaRamp::linear();
        let copied = ramp
            .with_raw(|raw| unsafe { GammaRamp::from_raw(raw) })
            .unwrap();
        assert_eq!(copied, ramp);
        assert_eq!(copied.red[0], 0);
        assert_eq!(copied.red[255], 65535);
        assert_eq!(copied.green[1], 257);
    }

    #[test]
    fn wrong_sized_native_ramps_are_rejected() {
        let mut red = vec![0u16; 128];
        let mut green = vec![0u16; 128];
        let mut blue = vec![0u16; 128];
        let raw = ffi::GLFWgammaramp {
            red: red.as_mut_ptr(),
            green: green.as_mut_ptr(),
            blue: blue.as_mut_ptr(),
            size: 128,
        };
        assert_eq!(unsafe { GammaRamp::from_raw(&raw) }, None);
        assert_eq!(unsafe { GammaRamp::from_raw(ptr::null()) }, None);
    }
}
