#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use std::{env, error::Error, io, time::Instant};

use hood::Dict;
use plotters::prelude::*;
use rand::Rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_KEYS: usize = 1024 * 1024;
// Slot count of the sampled tables; large enough that no sample triggers a resize
const SAMPLE_CAPACITY: usize = 1 << 16;
// Loads at which the displacement distribution is sampled, all below the 2/3 resize bound
const LOAD_FACTORS: [f64; 5] = [0.1, 0.25, 0.4, 0.55, 0.66];
const OUTPUT: &str = "displacement.png";

// Load factor paired with its displacement histogram
type Sample = (f64, Vec<usize>);

fn report(label: &str, start: Instant) {
    println!("{label:>15}: {:6.4}", start.elapsed().as_secs_f64());
}

// Same phases as the classic dict benchmark: add, lookup, delete, re-add, free
fn time_operations(nkeys: usize) -> Result<(), Box<dyn Error>> {
    println!("{:>15}: {nkeys}", "values");

    let start = Instant::now();
    let keys: Vec<String> = (0..nkeys).map(|i| format!("{i:08x}")).collect();
    report("initialization", start);

    let mut dict = Dict::new();
    let start = Instant::now();
    for key in &keys {
        dict.insert(key, Some(key.as_str()))?;
    }
    report("adding", start);

    let start = Instant::now();
    for key in &keys {
        match dict.get(key, Some("UNDEF")) {
            Some(value) if value == key.as_str() => {}
            other => warn!(key = key.as_str(), got = ?other, "wrong lookup result"),
        }
    }
    report("lookup", start);

    if nkeys < 100 {
        dict.dump(&mut io::stdout().lock())?;
    }

    let start = Instant::now();
    for key in &keys {
        if !dict.remove(key) {
            warn!(key = key.as_str(), "key vanished before delete");
        }
    }
    report("delete", start);

    let start = Instant::now();
    for key in &keys {
        dict.insert(key, Some(key.as_str()))?;
    }
    report("adding", start);

    let start = Instant::now();
    drop(dict);
    report("free", start);

    Ok(())
}

// Fills a fixed-size table with random keys up to each load factor
fn sample_histograms() -> Result<Vec<Sample>, Box<dyn Error>> {
    let mut rng = rand::rng();
    let mut samples = Vec::with_capacity(LOAD_FACTORS.len());

    for &load in &LOAD_FACTORS {
        let mut dict = Dict::with_capacity(SAMPLE_CAPACITY);
        let target = (SAMPLE_CAPACITY as f64 * load) as usize;
        while dict.len() < target {
            let key = format!("{:016x}", rng.random::<u64>());
            dict.insert(&key, None)?;
        }

        let histogram = dict.displacement_histogram();
        info!(
            load,
            entries = dict.len(),
            capacity = dict.capacity(),
            max_dib = dict.max_displacement(),
            "sampled displacement"
        );
        samples.push((load, histogram));
    }

    Ok(samples)
}

fn plot(samples: &[Sample]) -> Result<(), Box<dyn Error>> {
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50),  // Bright red
        RGBColor(50, 90, 220),  // Bright blue
        RGBColor(50, 180, 50),  // Bright green
        RGBColor(180, 50, 180), // Bright magenta
        RGBColor(230, 150, 30), // Orange
    ];

    let root = BitMapBackend::new(OUTPUT, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_dib = samples.iter().map(|(_, h)| h.len()).max().unwrap_or(1).max(1);
    let mut chart = ChartBuilder::on(&root)
        .caption("Robin Hood Displacement Distribution", (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..max_dib, 0.0..1.0)?;

    chart
        .configure_mesh()
        .x_desc("Distance From Home Slot")
        .y_desc("Share of Entries")
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (idx, (load, histogram)) in samples.iter().enumerate() {
        let color = &colors[idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(2);
        let total = histogram.iter().sum::<usize>().max(1) as f64;

        chart
            .draw_series(LineSeries::new(
                histogram.iter().enumerate().map(|(dib, &count)| (dib, count as f64 / total)),
                line_style,
            ))?
            .label(format!("load {load:.2}"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            histogram
                .iter()
                .enumerate()
                .map(|(dib, &count)| Circle::new((dib, count as f64 / total), 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let nkeys = match env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => DEFAULT_KEYS,
    };

    time_operations(nkeys)?;

    let samples = sample_histograms()?;
    plot(&samples)?;
    info!(output = OUTPUT, "wrote displacement chart");

    Ok(())
}
