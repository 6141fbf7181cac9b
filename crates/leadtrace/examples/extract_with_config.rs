use leadtrace::{ExtractConfig, Extractor, ScalarVolume};
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 6 {
        eprintln!(
            "Usage: {} <config.json> <volume.raw> <nx> <ny> <nz>",
            args[0]
        );
        std::process::exit(2);
    }

    let mut config = ExtractConfig::from_json_file(Path::new(&args[1]))?;
    // Fields can still be tuned after loading.
    config.proximity_radius = config.proximity_radius.max(1.0);

    let bytes = std::fs::read(&args[2])?;
    let dims = [args[3].parse()?, args[4].parse()?, args[5].parse()?];
    let data: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    let volume = ScalarVolume::new(dims, [1.0; 3], [0.0; 3], data)?;

    let result = Extractor::new(config).extract(&volume)?;
    for (i, p) in result.path.iter().enumerate() {
        println!("{i:4}  ({:9.3}, {:9.3}, {:9.3})", p.x, p.y, p.z);
    }
    if result.path.is_empty() {
        println!("No electrode trace found.");
    }
    Ok(())
}
