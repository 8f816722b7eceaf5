use heightfield_core::{BasisType, GridSpec, HeightSampler, NoiseConfig};

fn main() {
    let sampler = HeightSampler::new();
    let grid = GridSpec::new(8, 8, 4.0);

    // Print an 8×8 corner of every basis with seed 2025
    for kind in [
        BasisType::Gradient,
        BasisType::Simplex,
        BasisType::Cellular,
        BasisType::DomainWarp,
        BasisType::Ridged,
        BasisType::Billow,
    ] {
        let map = sampler.rasterize(&grid, &NoiseConfig::new(kind, 2025));
        println!("{:?}", kind);
        for row in &map {
            for v in row {
                print!("{:>6.3} ", v);
            }
            println!();
        }
        println!();
    }
}
