// 2D height map: row-major Vec<Vec<f32>>, access as `map[row][col]`
pub type HeightMap2D = Vec<Vec<f32>>;

// Flatten a 2D height map (row-major) into a single Vec<f32>,
// e.g. for a vertex buffer or an image buffer
pub fn flatten2(map: &HeightMap2D) -> Vec<f32> {
    map.iter().flat_map(|row| row.iter().copied()).collect()
}

// Rescale a height map in place to [0, 1] for previews.
// A flat map becomes all zeros.
pub fn normalize2(map: &mut HeightMap2D) {
    let mut min = f32::MAX;
    let mut max = f32::MIN;

    for row in map.iter() {
        for &val in row.iter() {
            min = min.min(val);
            max = max.max(val);
        }
    }

    let range = (max - min).max(0.001); // prevent zero-division
    for row in map.iter_mut() {
        for val in row.iter_mut() {
            *val = (*val - min) / range;
        }
    }
}
