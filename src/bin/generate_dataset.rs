use serde_json::json;

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
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // Per-class Hu moment profiles: (classification, [(mean, std_dev); 7])
    let classes: Vec<(&str, &str, [(f64, f64); 7])> = vec![
        (
            "T",
            "tesco",
            [
                (0.21, 0.02),
                (0.012, 0.004),
                (0.0009, 0.0003),
                (0.0004, 0.0002),
                (2.0e-7, 1.0e-7),
                (4.0e-5, 2.0e-5),
                (-1.0e-7, 8.0e-8),
            ],
        ),
        (
            "S",
            "shell",
            [
                (0.35, 0.03),
                (0.05, 0.01),
                (0.004, 0.001),
                (0.002, 0.0008),
                (6.0e-6, 3.0e-6),
                (4.0e-4, 2.0e-4),
                (2.0e-6, 1.5e-6),
            ],
        ),
        (
            "M",
            "mcdonalds",
            [
                (0.18, 0.015),
                (0.008, 0.002),
                (0.0005, 0.0002),
                (0.0002, 0.0001),
                (5.0e-8, 4.0e-8),
                (1.5e-5, 8.0e-6),
                (-3.0e-8, 2.0e-8),
            ],
        ),
    ];

    let segments_per_sample = 2;
    let samples_per_class = 5;
    let feature_names = ["hu1", "hu2", "hu3", "hu4", "hu5", "hu6", "hu7"];

    let mut samples = Vec::new();
    let mut segment_total = 0usize;

    for (classification, stem, profile) in &classes {
        for sample_no in 1..=samples_per_class {
            let mut segments = Vec::new();
            for segment_no in 1..=segments_per_sample {
                let values: Vec<serde_json::Value> = feature_names
                    .iter()
                    .zip(profile.iter())
                    .map(|(name, &(mean, std_dev))| {
                        json!({ "type": name, "value": rng.gauss(mean, std_dev) })
                    })
                    .collect();

                segments.push(json!({
                    "classification": classification,
                    "meta": { "no": segment_no },
                    "values": values,
                }));
                segment_total += 1;
            }

            samples.push(json!({
                "filename": format!("{stem}_{sample_no}.jpg"),
                "segments": segments,
            }));
        }
    }

    let dataset = json!({ "samples": samples });

    let output_path = "sample_dataset.json";
    let text = serde_json::to_string_pretty(&dataset).expect("Failed to serialize dataset");
    std::fs::write(output_path, text).expect("Failed to write output file");

    println!(
        "Wrote {} samples ({segment_total} segments, {} features each) to {output_path}",
        samples.len(),
        feature_names.len()
    );
}
