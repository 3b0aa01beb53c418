/// Space group, unit cell and NCS operators of a crystal structure.
#[derive(Debug, Clone, PartialEq)]
pub struct CrystalInfo {
    pub space_group: String,
    /// a, b, c (Å) and alpha, beta, gamma (degrees).
    pub unit_cell: [f32; 6],
    /// Flat, column-major operator matrices.
    pub ncs_operators: Vec<Vec<f64>>,
}

impl CrystalInfo {
    pub fn cell_lengths(&self) -> [f32; 3] {
        [self.unit_cell[0], self.unit_cell[1], self.unit_cell[2]]
    }

    pub fn cell_angles(&self) -> [f32; 3] {
        [self.unit_cell[3], self.unit_cell[4], self.unit_cell[5]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_is_split_into_lengths_and_angles() {
        let info = CrystalInfo {
            space_group: "P 21 21 21".into(),
            unit_cell: [10.0, 20.0, 30.0, 90.0, 90.0, 120.0],
            ncs_operators: Vec::new(),
        };
        assert_eq!(info.cell_lengths(), [10.0, 20.0, 30.0]);
        assert_eq!(info.cell_angles(), [90.0, 90.0, 120.0]);
    }
}
