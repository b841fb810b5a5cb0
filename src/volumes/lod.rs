// Copyright @yucwang 2026

use crate::math::constants::Float;
use crate::volumes::grid_volume::Volume;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

/// Builds the half resolution copy used for far-away rendering.
///
/// Output is `(w/2 + 1, h/2 + 1, d/2 + 1)`. Output voxel `o` reads source
/// voxel `min(2 o, dim - 1)`: interior sources average their 3x3x3
/// neighbourhood, boundary sources are copied. Output slices are independent
/// and computed on all available cores.
pub fn downsample(volume: &Volume) -> Volume {
    if volume.is_empty() {
        return Volume::empty();
    }

    let (w, h, d) = volume.dims();
    let (ow, oh, od) = (w / 2 + 1, h / 2 + 1, d / 2 + 1);
    log::info!("Creating reduced volume of size {}x{}x{} from {}x{}x{}.", ow, oh, od, w, h, d);

    let progress = ProgressBar::new(od as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} slices")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let next_slice = Arc::new(AtomicUsize::new(0));
    let thread_count = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(od);
    let (tx, rx) = mpsc::channel::<(usize, Vec<Float>)>();
    let mut output = Volume::new(ow, oh, od);
    let slice_len = ow * oh;

    thread::scope(|scope| {
        for _ in 0..thread_count {
            let next_slice = Arc::clone(&next_slice);
            let tx = tx.clone();
            scope.spawn(move || {
                loop {
                    let oz = next_slice.fetch_add(1, Ordering::Relaxed);
                    if oz >= od {
                        break;
                    }
                    let slice = downsample_slice(volume, oz, ow, oh);
                    if tx.send((oz, slice)).is_err() {
                        break;
                    }
                }
            });
        }

        drop(tx);
        for _ in 0..od {
            if let Ok((oz, slice)) = rx.recv() {
                let start = oz * slice_len;
                output.data_mut()[start..start + slice_len].copy_from_slice(&slice);
                progress.inc(1);
            }
        }
    });
    progress.finish_and_clear();

    output
}

fn downsample_slice(volume: &Volume, oz: usize, ow: usize, oh: usize) -> Vec<Float> {
    let (w, h, d) = volume.dims();
    let z = (2 * oz).min(d - 1);
    let mut slice = Vec::with_capacity(ow * oh);
    for oy in 0..oh {
        let y = (2 * oy).min(h - 1);
        for ox in 0..ow {
            let x = (2 * ox).min(w - 1);
            slice.push(neighbourhood_mean(volume, x, y, z));
        }
    }
    slice
}

fn neighbourhood_mean(volume: &Volume, x: usize, y: usize, z: usize) -> Float {
    if !volume.is_interior(x, y, z) {
        return volume[(x, y, z)];
    }
    let mut sum = 0.0;
    for zz in z - 1..=z + 1 {
        for yy in y - 1..=y + 1 {
            for xx in x - 1..=x + 1 {
                sum += volume[(xx, yy, zz)];
            }
        }
    }
    sum / 27.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LodLevel {
    Full,
    Reduced,
}

/// Picks the volume resolution from the camera distance.
///
/// Switches to `Reduced` beyond `threshold + hysteresis` and back to `Full`
/// below `threshold - hysteresis`; in between the current level is kept.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LodSelector {
    threshold: Float,
    hysteresis: Float,
    level: LodLevel,
}

impl LodSelector {
    pub fn new(threshold: Float, hysteresis: Float) -> Self {
        Self { threshold, hysteresis: hysteresis.abs(), level: LodLevel::Full }
    }

    pub fn level(&self) -> LodLevel {
        self.level
    }

    pub fn update(&mut self, distance: Float) -> LodLevel {
        self.level = match self.level {
            LodLevel::Full if distance > self.threshold + self.hysteresis => LodLevel::Reduced,
            LodLevel::Reduced if distance < self.threshold - self.hysteresis => LodLevel::Full,
            level => level,
        };
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downsample_dimensions() {
        let vol = Volume::new(8, 5, 3);
        let small = downsample(&vol);
        assert_eq!(small.dims(), (5, 3, 2));
        assert!(downsample(&Volume::empty()).is_empty());
    }

    #[test]
    fn downsample_uniform_is_identity() {
        for &(w, h, d) in &[(7, 7, 7), (8, 6, 4), (3, 10, 5), (1, 1, 1)] {
            let vol = Volume::uniform(w, h, d, 0.375);
            let small = downsample(&vol);
            assert!(small.data().iter().all(|v| (v - 0.375).abs() < 1e-6), "dims {}x{}x{}", w, h, d);
        }
    }

    #[test]
    fn downsample_averages_interior_and_copies_boundary() {
        let mut vol = Volume::new(5, 5, 5);
        vol[(2, 2, 2)] = 27.0;
        vol[(0, 0, 0)] = 3.0;
        let small = downsample(&vol);
        assert_eq!(small.dims(), (3, 3, 3));
        assert!((small[(1, 1, 1)] - 1.0).abs() < 1e-6);
        assert_eq!(small[(0, 0, 0)], 3.0);
        assert_eq!(small[(2, 2, 2)], 0.0);
    }

    #[test]
    fn lod_selector_hysteresis() {
        let mut lod = LodSelector::new(8.0, 0.5);
        assert_eq!(lod.update(3.0), LodLevel::Full);
        assert_eq!(lod.update(8.4), LodLevel::Full);
        assert_eq!(lod.update(8.6), LodLevel::Reduced);
        assert_eq!(lod.update(7.6), LodLevel::Reduced);
        assert_eq!(lod.update(7.4), LodLevel::Full);

        let mut sharp = LodSelector::new(8.0, 0.0);
        assert_eq!(sharp.update(8.0), LodLevel::Full);
        assert_eq!(sharp.update(8.01), LodLevel::Reduced);
        assert_eq!(sharp.update(8.0), LodLevel::Reduced);
        assert_eq!(sharp.update(7.99), LodLevel::Full);
    }
}
