use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

// ---------------------------------------------------------------------------
// Record layouts
// ---------------------------------------------------------------------------

/// Raw field names are deliberately messy so the column cleanup has work to do.
#[derive(Serialize)]
struct Village {
    village_name: String,
    district: &'static str,
    population: i64,
    #[serde(rename = "literacy_rate\n")]
    literacy_rate: Option<f64>,
    #[serde(rename = " has_school ")]
    has_school: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    water_source: Option<&'static str>,
}

#[derive(Serialize)]
struct Household {
    household_id: String,
    village_name: String,
    members: i64,
    monthly_income: f64,
    electrified: Option<bool>,
    crops: Vec<&'static str>,
}

const DISTRICTS: [&str; 4] = ["North", "South", "East", "West"];
const WATER: [&str; 3] = ["Well", "Tap", "River"];
const CROPS: [&str; 5] = ["Rice", "Wheat", "Millet", "Maize", "Pulses"];

fn villages(rng: &mut SimpleRng) -> Vec<Village> {
    (0..40)
        .map(|i| Village {
            village_name: format!("Village {:02}", i + 1),
            district: *rng.pick(&DISTRICTS),
            population: rng.gauss(1800.0, 600.0).max(120.0).round() as i64,
            literacy_rate: (!rng.chance(0.1))
                .then(|| (rng.gauss(0.68, 0.12).clamp(0.1, 0.99) * 1000.0).round() / 1000.0),
            has_school: rng.chance(0.7),
            water_source: (!rng.chance(0.15)).then(|| *rng.pick(&WATER)),
        })
        .collect()
}

fn households(rng: &mut SimpleRng, villages: &[Village]) -> Vec<Household> {
    (0..250)
        .map(|i| {
            let n_crops = 1 + (rng.next_u64() % 3) as usize;
            Household {
                household_id: format!("HH-{:04}", i + 1),
                village_name: rng.pick(villages).village_name.clone(),
                members: rng.gauss(5.0, 1.8).clamp(1.0, 14.0).round() as i64,
                monthly_income: (rng.gauss(9500.0, 3200.0).max(800.0) * 100.0).round() / 100.0,
                electrified: (!rng.chance(0.05)).then(|| rng.chance(0.8)),
                crops: (0..n_crops).map(|_| *rng.pick(&CROPS)).collect(),
            }
        })
        .collect()
}

fn write_json<T: Serialize>(dir: &Path, name: &str, rows: &[T]) -> Result<()> {
    let path = dir.join(name);
    let text = serde_json::to_string_pretty(rows).context("serialising rows")?;
    std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let villages = villages(&mut rng);
    let households = households(&mut rng, &villages);

    write_json(&out_dir, "villages.json", &villages)?;
    write_json(&out_dir, "households.json", &households)?;
    Ok(())
}
