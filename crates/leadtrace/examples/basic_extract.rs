use leadtrace::{ExtractConfig, Extractor, ScalarVolume};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 5 {
        eprintln!("Usage: {} <volume.raw> <nx> <ny> <nz> [out.json]", args[0]);
        std::process::exit(2);
    }

    let bytes = std::fs::read(&args[1])?;
    let dims = [args[2].parse()?, args[3].parse()?, args[4].parse()?];
    let data: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    let volume = ScalarVolume::new(dims, [1.0; 3], [0.0; 3], data)?;

    let extractor = Extractor::new(ExtractConfig::default());
    let result = extractor.extract(&volume)?;

    println!(
        "Extracted {} trace point(s) from {} slice(s).",
        result.path.len(),
        result.stats.n_slices
    );

    if let Some(out_path) = args.get(5) {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(out_path, json)?;
        println!("Wrote {out_path}");
    }
    Ok(())
}
