//! Writes a demo set of TURBO1/TURBO2 temperature exports to the current
//! directory, ready for `turbo-dash`.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

/// Seeded sensor noise: splitmix64 for uniforms, the polar method for
/// normals (the second sample of each pair is kept for the next call).
struct SensorNoise {
    seed: u64,
    spare: Option<f64>,
}

impl SensorNoise {
    fn seeded(seed: u64) -> Self {
        SensorNoise { seed, spare: None }
    }

    fn uniform(&mut self) -> f64 {
        self.seed = self.seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.seed;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        if let Some(z) = self.spare.take() {
            return mean + std_dev * z;
        }
        loop {
            let u = 2.0 * self.uniform() - 1.0;
            let v = 2.0 * self.uniform() - 1.0;
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                let k = (-2.0 * s.ln() / s).sqrt();
                self.spare = Some(v * k);
                return mean + std_dev * u * k;
            }
        }
    }
}

const UNITS: usize = 5;
const HOURS: i64 = 24 * 7;

/// Sensor dropouts read as a handful of near-zero values.
const DROPOUTS: usize = 6;

fn write_unit(path: &str, header: &str, base: f64, noise: &mut SensorNoise) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("creating {path}"))?;
    writer.write_record(["timestamp", header])?;

    let start = NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("invalid start date")?;

    let mut rows = 0;
    for h in 0..HOURS {
        let t = start + Duration::hours(h);
        let daily = (2.0 * std::f64::consts::PI * (h % 24) as f64 / 24.0).sin();
        let mut value = base + 12.0 * daily + noise.normal(0.0, 1.5);

        if noise.uniform() < DROPOUTS as f64 / HOURS as f64 {
            value = noise.normal(0.0, 0.5);
        }

        // The logger occasionally emits an unreadable cell.
        let cell = if noise.uniform() < 0.01 {
            "n/a".to_string()
        } else {
            format!("{value:.2}")
        };
        writer.write_record([t.format("%Y-%m-%d %H:%M:%S").to_string(), cell])?;
        rows += 1;
    }
    writer.flush().with_context(|| format!("flushing {path}"))?;
    Ok(rows)
}

fn main() -> Result<()> {
    let mut noise = SensorNoise::seeded(42);

    for unit in 1..=UNITS {
        for (turbo, offset) in [("TURBO1", 0.0), ("TURBO2", 6.0)] {
            let path = format!("unit{unit}_{turbo}.tsv");
            let header = format!("{turbo} exhaust temp unit {unit}");
            let base = 380.0 + 15.0 * unit as f64 + offset;
            let rows = write_unit(&path, &header, base, &mut noise)?;
            println!("Wrote {rows} readings to {path}");
        }
    }
    Ok(())
}
