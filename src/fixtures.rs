//! Seeded stand-ins for the sonar dataset, clustered around the two presets.

use crate::input::parse_input;
use crate::parse::{Dataset, Label, Sample, DIMENSIONS};
use crate::preset::Preset;
use rand::{rngs::StdRng, Rng, SeedableRng};

const JITTER: f64 = 0.03;

pub fn synthetic_dataset(per_class: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut samples = Vec::with_capacity(per_class * 2);

    for _ in 0..per_class {
        for (preset, label) in [(Preset::Rock, Label::Rock), (Preset::Mine, Label::Mine)] {
            let center = parse_input(preset.text()).unwrap();
            let mut features = [0.0; DIMENSIONS];
            for (feature, &value) in features.iter_mut().zip(center.values()) {
                *feature = (value + rng.random_range(-JITTER..JITTER)).clamp(0.0, 1.0);
            }
            samples.push(Sample { features, label });
        }
    }

    Dataset::new(samples)
}

pub fn synthetic_csv(per_class: usize, seed: u64) -> String {
    synthetic_dataset(per_class, seed)
        .samples()
        .iter()
        .map(|sample| {
            let mut fields: Vec<String> = sample.features.iter().map(ToString::to_string).collect();
            fields.push(sample.label.code().to_owned());
            fields.join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
