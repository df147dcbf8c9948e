use anyhow::Result;
use log::LevelFilter;

use strict_array::{zip_with, Array1, Array2, PrintOptions, Slice};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("STRICT_ARRAY_LOG", "error,strict_array=info"))
        .init();

    let opts = std::env::args()
        .nth(1)
        .map(|preset| preset.parse::<PrintOptions>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();

    let mut signal = Array1::from_vec((0..24).map(|i| i as f64 * 0.5).collect::<Vec<_>>());
    log::info!("signal: {}", signal.format_with(&opts));

    let evens = signal.slice(Slice::even())?;
    let tail = evens.slice(Slice::last(4))?.slice(Slice::reverse())?;
    log::info!("last four even samples, reversed: {}", tail.format_with(&opts));

    signal.slice_mut(Slice::range(1, 6, 4))?.fill(-1.0);
    signal.remove_indices(&[0, 23])?;
    log::info!("after edits: {}", signal.format_with(&opts));

    let grid = signal.view2(2, 11)?.to_owned();
    let mut scaled = Array2::default();
    scaled.resize_and_assign(&zip_with(&grid, &grid, |a: f64, b: f64| a * b))?;
    log::info!("squared grid:\n{}", scaled.format_with(&opts));

    let bad = Array2::from([[1.0, 2.0]]);
    if let Err(e) = scaled.resize_and_assign(&zip_with(&grid, &bad, |a: f64, b: f64| a + b)) {
        log::info!("rejected ({}); grid still {:?}", e, scaled.shape());
    }

    Ok(())
}
