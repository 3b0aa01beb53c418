use nalgebra::Matrix4;

/// One operation of a biological assembly: a set of chains and the affine
/// transform that generates their copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub chain_indices: Vec<usize>, // Global chain indices
    pub matrix: Vec<f64>,          // Column-major 4x4 (16 values) or 3x4 (12 values)
}

impl Transform {
    /// The transform as a homogeneous 4x4 matrix.
    ///
    /// A 3x4 matrix is completed with a `[0, 0, 0, 1]` bottom row.
    pub fn to_matrix4(&self) -> Option<Matrix4<f64>> {
        match self.matrix.len() {
            16 => Some(Matrix4::from_column_slice(&self.matrix)),
            12 => {
                let mut full = Matrix4::identity();
                for col in 0..4 {
                    for row in 0..3 {
                        full[(row, col)] = self.matrix[col * 3 + row];
                    }
                }
                Some(full)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BioAssembly {
    pub index: usize,
    pub name: String,
    pub transforms: Vec<Transform>,
}

impl BioAssembly {
    /// Every chain index referenced by at least one transform, sorted and unique.
    pub fn chain_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .transforms
            .iter()
            .flat_map(|t| t.chain_indices.iter().copied())
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector4;

    #[test]
    fn full_matrix_is_read_column_major() {
        let mut matrix = vec![0.0; 16];
        matrix[0] = 1.0;
        matrix[5] = 1.0;
        matrix[10] = 1.0;
        matrix[15] = 1.0;
        matrix[12] = 5.0; // x translation
        let transform = Transform {
            chain_indices: vec![0],
            matrix,
        };
        let m = transform.to_matrix4().unwrap();
        let moved = m * Vector4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(moved, Vector4::new(6.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn three_by_four_matrix_is_completed() {
        let matrix = vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 2.0, 0.0];
        let transform = Transform {
            chain_indices: vec![0],
            matrix,
        };
        let m = transform.to_matrix4().unwrap();
        assert_eq!(m[(1, 3)], 2.0);
        assert_eq!(m[(3, 3)], 1.0);
        assert_eq!(m[(3, 0)], 0.0);
    }

    #[test]
    fn malformed_matrix_has_no_matrix4() {
        let transform = Transform {
            chain_indices: vec![],
            matrix: vec![1.0; 9],
        };
        assert!(transform.to_matrix4().is_none());
    }

    #[test]
    fn chain_indices_are_unique_and_sorted() {
        let assembly = BioAssembly {
            index: 0,
            name: "1".into(),
            transforms: vec![
                Transform {
                    chain_indices: vec![2, 0],
                    matrix: vec![],
                },
                Transform {
                    chain_indices: vec![0, 1],
                    matrix: vec![],
                },
            ],
        };
        assert_eq!(assembly.chain_indices(), vec![0, 1, 2]);
    }
}
