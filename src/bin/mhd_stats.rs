use volviz::io::mhd::read_mhd_volume;

const BINS: usize = 10;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <volume.mhd>", args[0]);
        std::process::exit(1);
    }

    let volume = read_mhd_volume(&args[1]).unwrap_or_else(|e| {
        eprintln!("failed to read {}: {}", args[1], e);
        std::process::exit(1);
    });

    let data = volume.data();
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    let mut sum = 0.0f64;
    let mut histogram = [0usize; BINS];
    for &v in data {
        min = min.min(v);
        max = max.max(v);
        sum += v as f64;
        let bin = ((v * BINS as f32) as usize).min(BINS - 1);
        histogram[bin] += 1;
    }

    let (w, h, d) = volume.dims();
    println!("Size: {}x{}x{} ({} samples)", w, h, d, data.len());
    println!("Min: {:.6}", min);
    println!("Max: {:.6}", max);
    println!("Mean: {:.6}", sum / data.len().max(1) as f64);
    for (i, count) in histogram.iter().enumerate() {
        let lo = i as f32 / BINS as f32;
        let share = *count as f64 / data.len().max(1) as f64;
        println!("[{:.1}, {:.1}{} {:>10} {:6.2}%", lo, lo + 0.1, if i + 1 == BINS { "]" } else { ")" }, count, 100.0 * share);
    }
}
